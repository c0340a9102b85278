/// Resizes `elements` in place to `count` slots.
///
/// Slots shared by both lengths keep their element; new slots are appended
/// empty at the old tail, surplus trailing slots are dropped. Matching is by
/// index only.
pub fn resync_elements<T>(elements: &mut Vec<Option<T>>, count: usize) {
    let start = elements.len();
    if start < count {
        // The old tail is the insertion boundary, so existing slots never move.
        elements.resize_with(count, || None);
    } else if start > count {
        elements.truncate(count);
    }
}
