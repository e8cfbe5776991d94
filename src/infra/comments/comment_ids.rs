// Comment ids look like document-store auto ids: 20 alphanumeric characters.

use rand::distributions::Alphanumeric;
use rand::Rng;

pub const COMMENT_ID_LEN: usize = 20;

pub fn generate_comment_id() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(COMMENT_ID_LEN)
        .map(char::from)
        .collect()
}
