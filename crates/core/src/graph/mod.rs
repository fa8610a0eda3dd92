//! Graph data shown by the dashboard, its layout and the view commands the
//! renderer exposes.

mod datasets;
mod layout;
mod model;
mod view;

pub use datasets::{knowledge_graph, subject_graph};
pub use layout::{Layout, LayoutParams, Point, force_layout};
pub use model::{Edge, EdgeCategory, Graph, GraphError, Node, NodeCategory};
pub use view::{EdgeStyle, GraphCommand, GraphView, NodeStyle};
