use std::cmp::Ordering;

use indicatif::ProgressBar;

use crate::{
    catalog::{CatalogClient, MAX_RELEASE_PAGE_SIZE, Release, ReleaseGroup, Throttle},
    error::{CatalogError, Stage},
    types::ReleaseItem,
    warning,
};

#[derive(Debug, Clone, Copy)]
pub struct FetchOptions {
    pub page_size: u32,
    /// Upper bound of pages per group in case upstream never returns an empty page.
    pub max_pages: u32,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            page_size: 50,
            max_pages: 200,
        }
    }
}

/// Retrieves every release of an artist, group by group.
///
/// Each group is paged from offset 0 until a page comes back empty. Groups
/// are fetched one after another and the throttle runs after every page, the
/// empty one included. The first failing page aborts the whole fetch.
///
/// Releases are returned in fetch order: group order, then page order. A
/// release listed under several groups appears once per group.
///
/// A page size outside `1..=50` is rejected before any request is sent.
pub async fn fetch_all_releases<C: CatalogClient + ?Sized>(
    client: &C,
    artist_id: &str,
    options: FetchOptions,
    throttle: &mut Throttle,
    progress: &ProgressBar,
) -> Result<Vec<Release>, CatalogError> {
    if !(1..=MAX_RELEASE_PAGE_SIZE).contains(&options.page_size) {
        return Err(CatalogError::Config(format!(
            "release page size must be between 1 and {MAX_RELEASE_PAGE_SIZE}, got {}",
            options.page_size
        )));
    }

    let mut releases: Vec<Release> = Vec::new();

    for group in ReleaseGroup::ALL {
        let mut offset = 0;
        let mut pages = 0;

        loop {
            if pages >= options.max_pages {
                warning!(
                    "Stopped fetching {} releases after {} pages without an empty page",
                    group,
                    pages
                );
                break;
            }

            let page = client
                .artist_releases(artist_id, group, options.page_size, offset)
                .await
                .map_err(|e| {
                    CatalogError::upstream(
                        Stage::FetchReleases,
                        format!("{group} offset {offset}"),
                        e,
                    )
                })?;
            throttle.pause().await;
            pages += 1;

            if page.is_empty() {
                break;
            }

            releases = absorb_page(releases, group, page);
            offset += options.page_size;
            progress.set_message(format!(
                "Fetched {count} releases ({group})...",
                count = releases.len()
            ));
        }
    }

    Ok(releases)
}

/// Appends one page of listed releases to the accumulator.
pub fn absorb_page(
    mut releases: Vec<Release>,
    group: ReleaseGroup,
    page: Vec<ReleaseItem>,
) -> Vec<Release> {
    releases.extend(page.into_iter().map(|item| Release::from_item(item, group)));
    releases
}

/// Stable ascending sort by release date. Releases with an unparseable date go last.
pub fn order_by_release_date(releases: &mut [Release]) {
    releases.sort_by(|a, b| match (a.date(), b.date()) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
}
