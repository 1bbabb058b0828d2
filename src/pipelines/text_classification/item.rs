use std::fmt::Debug;

/// A trait for items that can be used for text classification
pub trait Item: Send + Sync + Clone + Debug {
    /// Returns the input text for the item
    fn input(&self) -> &str;

    /// Returns the class label for the item
    fn class_label(&self) -> &str;
}

/// Split a corpus into its documents and labels, preserving order
pub fn documents_and_labels<I: Item>(items: &[I]) -> (Vec<String>, Vec<String>) {
    items
        .iter()
        .map(|item| (item.input().to_string(), item.class_label().to_string()))
        .unzip()
}
