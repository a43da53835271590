use futures::stream::{self, BoxStream, StreamExt};

use super::{Bbox, PoiSearchError, RawRow};

pub type RowStream<'a> = BoxStream<'a, Result<RawRow, PoiSearchError>>;

/// source of candidate rows for a search.
///
/// implementations push the rectangle down to their storage and yield every
/// row with `bottom <= lat <= top` and `left <= long <= right`, in whatever
/// order the storage produces them. retrieval and scan failures are yielded
/// as [`PoiSearchError::RowSource`] items, which is distinct from an empty
/// stream. the stream is consumed lazily; dropping it must abandon any
/// in-flight retrieval.
pub trait RowSource: Send + Sync {
    fn rows_within(&self, bbox: Bbox) -> RowStream<'_>;
}

/// row source over a fixed set of rows held in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRowSource {
    rows: Vec<RawRow>,
}

impl InMemoryRowSource {
    pub fn new(rows: Vec<RawRow>) -> Self {
        Self { rows }
    }
}

impl RowSource for InMemoryRowSource {
    fn rows_within(&self, bbox: Bbox) -> RowStream<'_> {
        stream::iter(
            self.rows
                .iter()
                .filter(move |row| bbox.contains(row.long, row.lat))
                .cloned()
                .map(Ok),
        )
        .boxed()
    }
}
