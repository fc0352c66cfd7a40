//! Lazy iteration over paginated list results.

use std::collections::VecDeque;

use crate::clients::{FormValues, RequestOptions};
use crate::rest::errors::ResourceError;
use crate::rest::list::ListMeta;
use crate::rest::resource::{Resource, ResourceClient};

const STARTING_AFTER: &str = "starting_after";
const ENDING_BEFORE: &str = "ending_before";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum State {
    /// A page may still be fetched.
    Open,
    /// The last page has been fetched; only buffered items remain.
    LastPage,
    /// Every item has been yielded.
    Exhausted,
    /// A page fetch failed.
    Failed,
}

/// An iterator over every item of a list, fetching pages on demand.
///
/// The first page is requested on the first call to [`next`](Self::next).
/// Later pages are requested with the ID of the last yielded item as the
/// cursor (`starting_after`, or `ending_before` when paging backwards, in
/// which case each page is reversed so items keep arriving in walk order).
///
/// Once `next` returns `None` it keeps returning `None` without touching the
/// network. A failed page fetch is yielded once as `Some(Err(_))`; iteration
/// then stops and the error stays available from [`err`](Self::err).
///
/// Advancing needs `&mut self`: an iterator belongs to one call chain.
///
/// # Example
///
/// ```rust,ignore
/// let mut iter = plans.list(&PlanListParams::default());
/// while let Some(plan) = iter.next().await {
///     println!("{}", plan?.id);
/// }
/// ```
pub struct ListIter<R: Resource> {
    client: ResourceClient<R>,
    form: FormValues,
    options: RequestOptions,
    reverse: bool,
    single: bool,
    buffer: VecDeque<R>,
    cursor: Option<String>,
    meta: Option<ListMeta>,
    state: State,
    err: Option<ResourceError>,
}

impl<R: Resource> ListIter<R> {
    pub(crate) fn new(
        client: ResourceClient<R>,
        form: FormValues,
        options: RequestOptions,
        reverse: bool,
        single: bool,
    ) -> Self {
        Self {
            client,
            form,
            options,
            reverse,
            single,
            buffer: VecDeque::new(),
            cursor: None,
            meta: None,
            state: State::Open,
            err: None,
        }
    }

    /// An iterator that yields `error` once and then stops.
    pub(crate) fn failed(client: ResourceClient<R>, error: ResourceError) -> Self {
        let mut iter = Self::new(client, FormValues::new(), RequestOptions::default(), false, true);
        iter.err = Some(error);
        iter
    }

    /// Advances to the next item, fetching a page if the buffer is empty.
    pub async fn next(&mut self) -> Option<Result<R, ResourceError>> {
        loop {
            if let Some(item) = self.buffer.pop_front() {
                self.cursor = Some(item.id().to_string());
                return Some(Ok(item));
            }

            match self.state {
                State::Open => {}
                State::LastPage => {
                    self.state = State::Exhausted;
                    return None;
                }
                State::Exhausted | State::Failed => return None,
            }

            // Pre-flight failure recorded at construction.
            if let Some(error) = self.err.clone() {
                self.state = State::Failed;
                return Some(Err(error));
            }

            if let Err(error) = self.fetch_page().await {
                self.state = State::Failed;
                self.err = Some(error.clone());
                return Some(Err(error));
            }
        }
    }

    async fn fetch_page(&mut self) -> Result<(), ResourceError> {
        if let Some(cursor) = &self.cursor {
            let key = if self.reverse {
                ENDING_BEFORE
            } else {
                STARTING_AFTER
            };
            self.form.set(key, cursor.clone());
        }

        let page = self.client.fetch_page(&self.form, &self.options).await?;

        tracing::debug!(
            resource = R::NAME,
            items = page.data.len(),
            has_more = page.meta.has_more,
            "Fetched list page"
        );

        // An empty page cannot advance the cursor, so it ends the walk.
        self.state = if self.single || !page.meta.has_more || page.data.is_empty() {
            State::LastPage
        } else {
            State::Open
        };

        let mut data = page.data;
        if self.reverse {
            data.reverse();
        }
        self.buffer.extend(data);
        self.meta = Some(page.meta);

        Ok(())
    }

    /// Returns the error that stopped iteration, if any.
    ///
    /// `None` after a normal end of iteration.
    #[must_use]
    pub fn err(&self) -> Option<&ResourceError> {
        self.err.as_ref()
    }

    /// Returns the pagination state of the most recently fetched page.
    #[must_use]
    pub fn meta(&self) -> Option<&ListMeta> {
        self.meta.as_ref()
    }

    /// Returns `true` once every item has been yielded without error.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.state == State::Exhausted
    }

    /// Drains the iterator into a vector.
    ///
    /// # Errors
    ///
    /// Returns the first error encountered; items yielded before it are
    /// discarded.
    pub async fn collect_all(mut self) -> Result<Vec<R>, ResourceError> {
        let mut items = Vec::new();
        while let Some(item) = self.next().await {
            items.push(item?);
        }
        Ok(items)
    }
}

impl<R: Resource + std::fmt::Debug> std::fmt::Debug for ListIter<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListIter")
            .field("resource", &R::NAME)
            .field("buffered", &self.buffer.len())
            .field("cursor", &self.cursor)
            .field("state", &self.state)
            .field("err", &self.err)
            .finish_non_exhaustive()
    }
}
