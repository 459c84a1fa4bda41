// Asset handles
//
// Sprite sheets are referenced by typed handles derived from their path.
// Loading the pixel data belongs to the renderer and is not handled here.

mod handle;

pub use handle::{AssetHandle, AssetId, SheetAsset, SheetHandle};
