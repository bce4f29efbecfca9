//! Layout engine: shared measurement, per-template plans, and page flow.
//!
//! Everything both renderer backends must agree on lives here — the plans
//! (`plan`), the derived display strings (`text`), the width tables
//! (`font_metrics`) and the page model (`paginate`). Renderer backends sit
//! on top and only draw.

pub mod color;
pub mod font_metrics;
pub mod paginate;
pub mod plan;
pub mod text;
