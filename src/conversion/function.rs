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

//! Single-argument conversion trait

use crate::core::Result;

/// A reusable, immutable conversion from `S` to [`Conversion::Output`]
///
/// Implementors provide [`Conversion::convert`] for present values.
/// [`Conversion::apply`] adds the absent-in, absent-out contract: `None` is
/// returned as `None` before any validation or formatting takes place.
pub trait Conversion<S>: Send + Sync {
    /// Type produced by the conversion
    type Output;

    /// Conversion name used in logs
    fn name(&self) -> &'static str;

    /// Convert a present value
    fn convert(&self, input: S) -> Result<Self::Output>;

    /// Convert an optional value, passing `None` through untouched
    fn apply(&self, input: Option<S>) -> Result<Option<Self::Output>> {
        match input {
            None => Ok(None),
            Some(value) => self.convert(value).map(Some),
        }
    }
}
