// Core algorithm exports
pub mod export;
pub mod history;
pub mod matcher;
pub mod scoring;
pub mod skills;

pub use export::{render_pages, to_csv, to_report_pages, ExportError, ReportLayout, ReportPage, ReportRecord};
pub use history::build_history;
pub use matcher::{AssignedEvents, Matcher};
pub use scoring::{affinity_noise, score_event, urgency_weight};
pub use skills::{matching_skills, normalize, overlaps, SkillSet};
