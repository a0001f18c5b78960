// Copyright 2026 BadCompany
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Time utilities.
//!
//! Clock access and IANA zone lookup for the time tool.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;

pub fn now() -> DateTime<Utc> {
    Utc::now()
}

/// Look up an IANA zone name, ignoring ASCII case.
pub fn parse_timezone(name: &str) -> Option<Tz> {
    Tz::from_str_insensitive(name.trim()).ok()
}

/// Zone of the host: `TZ` first, then the system setting.
///
/// `None` when neither names a zone in the database; callers fall back to
/// the local UTC offset.
pub fn host_timezone() -> Option<Tz> {
    if let Ok(tz) = std::env::var("TZ") {
        // POSIX allows a leading ':' before a zone file name
        if let Some(zone) = parse_timezone(tz.trim_start_matches(':')) {
            return Some(zone);
        }
    }
    iana_time_zone::get_timezone()
        .ok()
        .and_then(|name| parse_timezone(&name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_timezone() {
        assert_eq!(parse_timezone("UTC"), Some(Tz::UTC));
        assert_eq!(
            parse_timezone("america/new_york"),
            Some(Tz::America__New_York)
        );
        assert_eq!(parse_timezone("Mars/Olympus_Mons"), None);
        assert_eq!(parse_timezone(""), None);
    }
}
