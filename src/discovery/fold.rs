use std::future::Future;

/// Ordered asynchronous reduction over a sequence.
///
/// Each step receives the item's index, the item, and the accumulator
/// produced by the previous step, and yields the next accumulator. At most
/// one step is in flight at a time: step N+1 starts only after step N's
/// future resolves, so an O(n) chain of network calls issued through this
/// fold is strictly serialized. An empty sequence yields `init` without
/// invoking `step` at all.
///
/// There is no error channel and no timeout; a step that never resolves
/// stalls the fold. Steps that can fail decide for themselves what
/// accumulator represents a failed step (typically passing it through
/// unchanged, or carrying a `Result` as the accumulator).
pub async fn fold<T, A, F, Fut>(items: impl IntoIterator<Item = T>, init: A, mut step: F) -> A
where
    F: FnMut(usize, T, A) -> Fut,
    Fut: Future<Output = A>,
{
    let mut acc = init;
    for (index, item) in items.into_iter().enumerate() {
        acc = step(index, item, acc).await;
    }
    acc
}
