// Type-safe asset handle system

use std::marker::PhantomData;

/// Unique identifier for an asset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AssetId(pub(crate) u64);

impl AssetId {
    /// Create a new asset ID from a string path
    pub fn from_path(path: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        path.hash(&mut hasher);
        Self(hasher.finish())
    }

    /// Get the raw u64 value
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

/// Type-safe handle to an asset
///
/// The `T` parameter ensures handles can only be used with the correct asset type.
#[derive(Debug)]
pub struct AssetHandle<T> {
    id: AssetId,
    _phantom: PhantomData<T>,
}

// Manual impls: the derives would require `T` itself to be Copy/Eq/Hash
impl<T> Clone for AssetHandle<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for AssetHandle<T> {}

impl<T> PartialEq for AssetHandle<T> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<T> Eq for AssetHandle<T> {}

impl<T> std::hash::Hash for AssetHandle<T> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl<T> AssetHandle<T> {
    /// Create a handle for the asset stored at `path`
    pub fn from_path(path: &str) -> Self {
        Self {
            id: AssetId::from_path(path),
            _phantom: PhantomData,
        }
    }

    /// Get the underlying asset ID
    pub fn id(&self) -> AssetId {
        self.id
    }
}

/// Marker type for sprite sheets
#[derive(Debug)]
pub struct SheetAsset;

/// Handle to a sprite sheet
pub type SheetHandle = AssetHandle<SheetAsset>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asset_id_from_path() {
        let id1 = AssetId::from_path("sheets/player.png");
        let id2 = AssetId::from_path("sheets/player.png");
        let id3 = AssetId::from_path("sheets/crate.png");

        assert_eq!(id1, id2, "Same paths should produce same IDs");
        assert_ne!(id1, id3, "Different paths should produce different IDs");
    }

    #[test]
    fn test_handle_equality() {
        let handle1 = SheetHandle::from_path("sheets/player.png");
        let handle2 = SheetHandle::from_path("sheets/player.png");
        let handle3 = SheetHandle::from_path("sheets/rifle.png");

        assert_eq!(handle1, handle2);
        assert_ne!(handle1, handle3);
        assert_eq!(handle1.id(), AssetId::from_path("sheets/player.png"));
    }

    #[test]
    fn test_handle_is_copy() {
        let handle = SheetHandle::from_path("sheets/player.png");
        let copy = handle;
        assert_eq!(handle, copy);
    }
}
