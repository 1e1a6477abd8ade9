//! Run an API call while tracking loading and error state.

use std::future::Future;

use log::error;

use super::{ApiError, ApiResponse, status_message};

/// Runs API calls and reports their progress through two setters.
///
/// # Example
///
/// ```ignore
/// let mut action = ApiAction::new(|error| set_error(error), |loading| table.set_loading(loading));
/// action
///     .execute(fetch_rows(request), |rows| table.set_data(rows), "Failed to load rows")
///     .await;
/// ```
pub struct ApiAction<'a> {
    set_error: Box<dyn FnMut(Option<String>) + 'a>,
    set_loading: Box<dyn FnMut(bool) + 'a>,
}

impl<'a> ApiAction<'a> {
    /// Create an action reporting through the given setters.
    pub fn new(
        set_error: impl FnMut(Option<String>) + 'a,
        set_loading: impl FnMut(bool) + 'a,
    ) -> Self {
        Self {
            set_error: Box::new(set_error),
            set_loading: Box::new(set_loading),
        }
    }

    /// Run `action`.
    ///
    /// Loading is set before the call and always cleared after it, and the
    /// error is cleared up front. A successful response goes to
    /// `on_success`. A failed response sets the dedicated message for its
    /// status if there is one, else the server's error text, else
    /// `error_message`. A call that produced no response sets
    /// `error_message`.
    pub async fn execute<T, F, S>(&mut self, action: F, on_success: S, error_message: &str)
    where
        F: Future<Output = Result<ApiResponse<T>, ApiError>>,
        S: FnOnce(T),
    {
        (self.set_loading)(true);
        (self.set_error)(None);

        match action.await {
            Ok(ApiResponse::Ok { data, .. }) => on_success(data),
            Ok(ApiResponse::Bad { error, status }) => {
                let fallback = error.unwrap_or_else(|| error_message.to_string());
                (self.set_error)(Some(status_message(status, &fallback)));
            }
            Err(err) => {
                error!("{error_message}: {err}");
                (self.set_error)(Some(error_message.to_string()));
            }
        }

        (self.set_loading)(false);
    }
}
