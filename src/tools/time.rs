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

//! Current-time tool.
//!
//! `locale` renders the en-US long form, e.g.
//! `October 16, 2026 at 09:30:00 AM EDT`. The `timezone` parameter is only
//! consulted by that format. Unrecognized formats render as `locale`.

use chrono::{DateTime, Local, Offset, SecondsFormat, TimeZone, Utc};

use crate::engine_core::errors::ToolError;
use crate::engine_core::models::{OperationDescriptor, ParamKind, ParameterSpec};
use crate::engine_core::params::Arguments;
use crate::tools::ToolHandler;
use crate::utils::time;

const LOCALE_PATTERN: &str = "%B %-d, %Y at %I:%M:%S %p";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeFormat {
    Iso,
    #[default]
    Locale,
    Unix,
}

impl TimeFormat {
    pub const fn as_str(&self) -> &'static str {
        match self {
            TimeFormat::Iso => "iso",
            TimeFormat::Locale => "locale",
            TimeFormat::Unix => "unix",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        [TimeFormat::Iso, TimeFormat::Locale, TimeFormat::Unix]
            .into_iter()
            .find(|f| f.as_str() == name)
    }
}

const FORMAT_NAMES: &[&str] = &[
    TimeFormat::Iso.as_str(),
    TimeFormat::Locale.as_str(),
    TimeFormat::Unix.as_str(),
];

static DESCRIPTOR: OperationDescriptor = OperationDescriptor {
    name: "time",
    description: "Returns the current date and time",
    parameters: &[
        ParameterSpec::optional(
            "format",
            ParamKind::String,
            "Time format: \"iso\", \"locale\", or \"unix\" (default: locale)",
        )
        .one_of(FORMAT_NAMES),
        ParameterSpec::optional(
            "timezone",
            ParamKind::String,
            "Timezone (e.g., \"UTC\", \"America/New_York\")",
        ),
    ],
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TimeTool;

impl ToolHandler for TimeTool {
    fn descriptor(&self) -> &'static OperationDescriptor {
        &DESCRIPTOR
    }

    fn call(&self, args: Arguments<'_>) -> Result<String, ToolError> {
        let format = args
            .str("format")
            .and_then(TimeFormat::from_name)
            .unwrap_or_default();
        let formatted = render(time::now(), format, args.non_empty_str("timezone"))?;
        Ok(format!("Current time: {formatted}"))
    }
}

/// Format `now`; `timezone` applies to [`TimeFormat::Locale`] only.
pub fn render(
    now: DateTime<Utc>,
    format: TimeFormat,
    timezone: Option<&str>,
) -> Result<String, ToolError> {
    match format {
        TimeFormat::Iso => Ok(now.to_rfc3339_opts(SecondsFormat::Millis, true)),
        TimeFormat::Unix => Ok(now.timestamp().to_string()),
        TimeFormat::Locale => match timezone {
            Some(name) => {
                let zone = time::parse_timezone(name)
                    .ok_or_else(|| ToolError::InvalidTimezone(name.to_string()))?;
                Ok(locale_string(now.with_timezone(&zone)))
            }
            None => Ok(match time::host_timezone() {
                Some(zone) => locale_string(now.with_timezone(&zone)),
                None => locale_string(now.with_timezone(&Local)),
            }),
        },
    }
}

fn locale_string<Z: TimeZone>(at: DateTime<Z>) -> String
where
    Z::Offset: std::fmt::Display,
{
    let abbr = at.format("%Z").to_string();
    // Zones without a letter abbreviation print their offset, e.g. `+04`
    let zone = if abbr.starts_with(['+', '-']) {
        gmt_label(at.offset().fix().local_minus_utc())
    } else {
        abbr
    };
    format!("{} {}", at.format(LOCALE_PATTERN), zone)
}

/// `GMT`, `GMT+4`, `GMT-3:30`.
fn gmt_label(offset_secs: i32) -> String {
    if offset_secs == 0 {
        return "GMT".to_string();
    }
    let sign = if offset_secs < 0 { '-' } else { '+' };
    let secs = offset_secs.abs();
    let (hours, minutes) = (secs / 3600, secs % 3600 / 60);
    if minutes == 0 {
        format!("GMT{sign}{hours}")
    } else {
        format!("GMT{sign}{hours}:{minutes:02}")
    }
}
