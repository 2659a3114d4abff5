mod hand_arc;
mod keyed_image;

pub use hand_arc::HandArc;
pub use keyed_image::KeyedImage;
