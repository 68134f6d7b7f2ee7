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

//! Shared conversions used from many threads at once

use chrono::{Duration, NaiveDate};
use octofhir_temporal_convert::{
    Conversion, ConversionSpec, FieldsToDateTime, LocalDateToString, Locale, StringToLocalDate, Tz,
};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;

const THREADS: usize = 8;
const ITERATIONS: usize = 500;

#[test]
fn shared_spec_round_trips_on_every_thread() {
    let spec = ConversionSpec::builder()
        .pattern("EEEE d MMMM yyyy")
        .locale(Locale::fr_FR)
        .build()
        .unwrap();
    let parse = Arc::new(StringToLocalDate::new(spec.clone()));
    let print = Arc::new(LocalDateToString::new(spec).unwrap());
    let completed = Arc::new(AtomicUsize::new(0));

    let base = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
    let handles: Vec<_> = (0..THREADS)
        .map(|thread_index| {
            let parse = Arc::clone(&parse);
            let print = Arc::clone(&print);
            let completed = Arc::clone(&completed);
            thread::spawn(move || {
                for i in 0..ITERATIONS {
                    let days = (thread_index * ITERATIONS + i) as i64;
                    let value = base + Duration::days(days);
                    let text = print.convert(value).unwrap();
                    assert_eq!(parse.convert(&text).unwrap(), value, "{text}");
                    completed.fetch_add(1, Ordering::Relaxed);
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("conversion thread panicked");
    }
    assert_eq!(completed.load(Ordering::Relaxed), THREADS * ITERATIONS);
}

#[test]
fn shared_field_conversion_is_independent_per_call() {
    let conversion = Arc::new(FieldsToDateTime::new().with_time_zone(Tz::Europe__Berlin));

    thread::scope(|scope| {
        for hour in 0..THREADS as i32 {
            let conversion = Arc::clone(&conversion);
            scope.spawn(move || {
                for day in 1..=28 {
                    let value = conversion.convert(&[2022, 2, day, hour][..]).unwrap();
                    assert_eq!(
                        value.naive_local(),
                        NaiveDate::from_ymd_opt(2022, 2, day as u32)
                            .unwrap()
                            .and_hms_opt(hour as u32, 0, 0)
                            .unwrap()
                    );
                }
            });
        }
    });
}
