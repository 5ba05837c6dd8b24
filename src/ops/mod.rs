pub mod checklist;
pub mod checklist_render;
pub mod search;
