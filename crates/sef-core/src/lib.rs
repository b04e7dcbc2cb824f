pub mod codec;
pub mod figure;
pub mod geom;
pub mod hit;
pub mod id;
pub mod model;
pub mod selection;
pub mod shape;

pub use codec::{CodecError, ErrorKind, FORMAT_VERSION, FILE_EXTENSION};
pub use figure::{Color, Figure};
pub use geom::{Point, RectRegion, Region};
pub use hit::{figures_in_region, pick_at_point};
pub use id::FigureId;
pub use model::Drawing;
pub use selection::{Canvas, SelectionEngine, SelectionListener, SelectionSummary};
pub use shape::{Circle, Geometry, Polygon, Rectangle, Shape, ShapeKind, Triangle};
