use futures::TryStreamExt;
use serde::{Deserialize, Serialize};

use super::{
    category_tags,
    record::geometry_gpkg_codec::{decode_point, HeaderPolicy},
    Bbox, CategoryFilter, CategoryMatching, PoiSearchError, PointOfInterest, RawRow, RowSource,
};

/// tunable behaviour of a [`PoiSearch`].
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(default)]
pub struct SearchOptions {
    /// how the geometry header is skipped
    pub header_policy: HeaderPolicy,
    /// how row tags are compared with the requested categories
    pub category_matching: CategoryMatching,
    /// reject rectangles with left > right or bottom > top
    pub strict_bbox: bool,
}

/// a validated search.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchRequest {
    pub bbox: Bbox,
    pub categories: CategoryFilter,
}

impl SearchRequest {
    /// validates the raw `bbox` and `categories` parameters.
    pub fn parse(
        bbox: &str,
        categories: &str,
        options: &SearchOptions,
    ) -> Result<Self, PoiSearchError> {
        let bbox: Bbox = bbox.parse()?;
        if options.strict_bbox {
            bbox.validate()?;
        }
        let categories = CategoryFilter::compile(categories)?;
        Ok(Self { bbox, categories })
    }
}

/// runs bounding box + category searches against a [`RowSource`].
///
/// each search is independent; the only shared state is the row source
/// itself, so a single `PoiSearch` can serve concurrent requests.
#[derive(Debug, Clone)]
pub struct PoiSearch<S> {
    source: S,
    options: SearchOptions,
}

impl<S: RowSource> PoiSearch<S> {
    pub fn new(source: S, options: SearchOptions) -> Self {
        Self { source, options }
    }

    pub fn options(&self) -> &SearchOptions {
        &self.options
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// parses the raw request parameters and runs the search.
    pub async fn search(
        &self,
        bbox: &str,
        categories: &str,
    ) -> Result<Vec<PointOfInterest>, PoiSearchError> {
        let request = SearchRequest::parse(bbox, categories, &self.options)?;
        self.execute(&request).await
    }

    /// retrieves the rows inside the rectangle and keeps those matching the
    /// category filter, preserving the row source order.
    ///
    /// the first row that fails to decode or to be retrieved aborts the
    /// whole search; no partial result is returned. dropping the returned
    /// future drops the row stream along with it.
    pub async fn execute(
        &self,
        request: &SearchRequest,
    ) -> Result<Vec<PointOfInterest>, PoiSearchError> {
        let mut rows = self.source.rows_within(request.bbox);
        let mut results = Vec::new();
        while let Some(row) = rows.try_next().await? {
            if let Some(poi) = self.assemble(row, &request.categories)? {
                results.push(poi);
            }
        }
        log::debug!(
            "search in bbox {} returned {} results",
            request.bbox,
            results.len()
        );
        Ok(results)
    }

    fn assemble(
        &self,
        row: RawRow,
        categories: &CategoryFilter,
    ) -> Result<Option<PointOfInterest>, PoiSearchError> {
        let point = decode_point(&row.geom, self.options.header_policy).map_err(|source| {
            PoiSearchError::GeometryDecode {
                fid: row.fid,
                source,
            }
        })?;
        let tags = category_tags(
            row.main_category.as_deref(),
            row.alternate_category.as_deref(),
        );
        if !categories.matches(&tags, self.options.category_matching) {
            return Ok(None);
        }
        Ok(Some(PointOfInterest::from_row(row, point.wkt, tags)))
    }
}
