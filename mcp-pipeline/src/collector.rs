//! Context collector: turns raw input into the key/value context.

use crate::api_types::{CollectedContext, KEY_TOPIC, KEY_USER_NAME, UserInput};

/// Builds the context map for one request.
///
/// Always yields exactly two entries. Values are copied as-is; sanitising
/// is the caller's job.
pub fn collect(input: &UserInput) -> CollectedContext {
    CollectedContext::from([
        (KEY_USER_NAME.to_string(), input.user_name.clone()),
        (KEY_TOPIC.to_string(), input.topic.clone()),
    ])
}
