// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::sync::LazyLock;

use regex::Regex;

static TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").expect("valid tag pattern"));

/// Remove markup tags from a directory description and decode HTML entities
///
/// Anything between `<` and the next `>` is dropped. A `<` without a closing
/// `>` is kept as text.
pub fn strip_html_tags(input: &str) -> String {
    let without_tags = TAG.replace_all(input, "");
    html_escape::decode_html_entities(&without_tags).into_owned()
}
