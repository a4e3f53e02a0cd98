mod alignment;
pub use alignment::{ConformanceError, RecombinationAlignment};

mod dp_matrix;
pub use dp_matrix::RecombinationMatrix;

mod trace;
pub(crate) use trace::StepShape;
pub use trace::{serialize_parent_labels, Parent, TracebackMove};
