// Cursor-based pagination for the résumé PDF.
// Composition is pure CPU work; async callers run it inside tokio::task::spawn_blocking.

pub mod compose;
pub mod font_metrics;
pub mod page;
pub mod page_fill;
pub mod wrap;

pub use compose::{compose_resume, LaidOutDocument, LaidOutPage};
pub use page::{PageGeometry, PageSize};
pub use page_fill::{analyze_page_fill, PageFillAnalysis};
pub use wrap::wrap_text;
