use crate::ids::ItemId;

/// A single card supplied by the caller. The engine never mutates items; it
/// only resolves indices back to them.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CarouselItem {
    pub id: ItemId,
    pub title: String,
    /// Locator for the card image. Opaque to the engine.
    pub image_ref: String,
    /// Destination opened by the consumer when the card is activated.
    pub link_ref: String,
}

impl CarouselItem {
    pub fn new(
        title: impl Into<String>,
        image_ref: impl Into<String>,
        link_ref: impl Into<String>,
    ) -> Self {
        Self {
            id: ItemId::new(),
            title: title.into(),
            image_ref: image_ref.into(),
            link_ref: link_ref.into(),
        }
    }

    pub fn with_id(mut self, id: ItemId) -> Self {
        self.id = id;
        self
    }
}
