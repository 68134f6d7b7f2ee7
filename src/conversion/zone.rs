// Copyright 2024 OctoFHIR Team
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

use crate::core::temporal::effective_zone;
use crate::core::Chronology;
use chrono_tz::Tz;

/// Zone options of conversions that build instants without a formatter
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct ZoneOptions {
    pub(crate) time_zone: Option<Tz>,
    pub(crate) chronology: Option<Chronology>,
}

impl ZoneOptions {
    pub(crate) fn zone(&self) -> Tz {
        effective_zone(self.time_zone, self.chronology.as_ref())
    }
}
