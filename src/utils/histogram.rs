//! Histogram used as the basis for the distribution counting done by the
//! per-read-group statistics facilities.
//!
//! # Overview
//!
//! [Histograms] are a common way to make sense of a distribution of data.
//! Briefly, data along a continuous (or sometimes discrete) distribution is
//! partitioned into bins. Bins are generally consecutive and are
//! non-overlapping in nature. This straightforward model helps to easily
//! visualize and make sense of sometimes complex data.
//!
//! In this module, we implement a very simple histogram that represents the
//! minimum viable histogram needed for the `bamstats` command line tool.
//! Bins are discrete, signed integers: several of the metrics we collect
//! (template length in particular) are signed quantities where negative
//! observations are meaningful and must land in their own bins rather than
//! being clamped or discarded. As such, the histogram is backed by an ordered
//! map from bin to count instead of a zero-based array, and any `i64` is a
//! valid bin—incrementing can never fail.
//!
//! # Usage
//!
//! You can create an empty histogram with [`Histogram::default`]. After you
//! have a [`Histogram`], you'll commonly want to increment bins: you can
//! increment a bin by one (essentially, a `+= 1`) with the
//! [`increment`][`Histogram::increment`] method. If you need to increment the
//! bin by more than one at a time, you can use the
//! [`increment_by`][Histogram::increment_by] method.
//!
//! ```
//! use bamstats::utils::histogram::Histogram;
//! let mut hist = Histogram::default();
//!
//! // Increments the zero bin by one.
//! hist.increment(0);
//!
//! // Increments the negative one-hundred bin by fourty-two.
//! hist.increment_by(-100, 42);
//!
//! // Ensure that we actually recorded these values.
//! assert_eq!(hist.get(0), 1);
//! assert_eq!(hist.get(-100), 42);
//! ```
//!
//! You can do other various operations, such as:
//!
//! - Find the mean of the distribution ([`mean`][Histogram::mean]).
//! - Find an arbitrary percentile of the distribution ([`percentile`][Histogram::percentile]).
//! - Find the first quartile of the distribution ([`first_quartile`][Histogram::first_quartile]).
//! - Find the median (second quartile) of the distribution ([`median`][Histogram::median]).
//! - Find the third quartile of the distribution ([`third_quartile`][Histogram::third_quartile]).
//! - Find the interquartile range of the distribution ([`interquartile_range`][Histogram::interquartile_range]).
//! - Find the sum of all counts within the distribution ([`sum`][Histogram::sum]).
//! - Find the smallest and largest occupied bins ([`min`][Histogram::min],
//!   [`max`][Histogram::max]).
//!
//! All of the above return [`Option`]s (or [`f64::NAN`] for
//! [`mean`][Histogram::mean]) on an empty distribution rather than
//! panicking—an empty histogram is a normal state for a metric that was never
//! observed (for example, the edit-distance distribution of a file with no
//! `NM` tags).
//!
//! [Histograms]: https://en.wikipedia.org/wiki/Histogram

use std::collections::BTreeMap;
use std::fmt;

use anyhow::bail;
use serde::{Deserialize, Serialize};

/// Histogram used as the basis for the distribution counting done by the
/// per-read-group statistics facilities. For more in depth information,
/// please see the [module-level documentation].
///
/// [module-level documentation]: self
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Histogram {
    // Ordered bin to count store for the histogram. Only occupied bins are
    // present.
    values: BTreeMap<i64, usize>,
}

impl Histogram {
    //=================================//
    // Getting and incrementing values //
    //=================================//

    /// Increments a particular bin in the histogram by one.
    pub fn increment(&mut self, bin: i64) {
        self.increment_by(bin, 1)
    }

    /// Increments a particular bin in the histogram by the specified value.
    pub fn increment_by(&mut self, bin: i64, value: usize) {
        *self.values.entry(bin).or_insert(0) += value;
    }

    /// Gets the count for a bin within the histogram. Bins that were never
    /// incremented hold a count of zero.
    pub fn get(&self, bin: i64) -> usize {
        self.values.get(&bin).copied().unwrap_or_default()
    }

    /// Simply returns the occupied bins and their counts by ref, ordered by
    /// bin.
    pub fn values(&self) -> &BTreeMap<i64, usize> {
        &self.values
    }

    //=======//
    // Range //
    //=======//

    /// Gives the smallest occupied bin of the histogram.
    pub fn min(&self) -> Option<i64> {
        self.values.keys().next().copied()
    }

    /// Gives the largest occupied bin of the histogram.
    pub fn max(&self) -> Option<i64> {
        self.values.keys().next_back().copied()
    }

    //========================//
    // Numerical computations //
    //========================//

    /// Computes the sum of the counts within the distribution.
    pub fn sum(&self) -> usize {
        self.values.values().sum()
    }

    /// Computes the mean of all values within the histogram.
    pub fn mean(&self) -> f64 {
        let mut sum = 0.0;
        let mut denominator = 0.0;

        for (bin, count) in &self.values {
            denominator += *count as f64;
            sum += (*bin as f64) * (*count as f64);
        }

        sum / denominator
    }

    /// Computes the value of the nth percentile based on an exhaustive walk
    /// of the occupied bins.
    pub fn percentile(&self, percentile: f64) -> anyhow::Result<Option<f64>> {
        // (1) Bounds check on the input data
        if !(0.0..=1.0).contains(&percentile) {
            bail!("Provided percentile was not within a valid range.");
        }

        // (2) Count up the total number of items in the histogram. If the
        // number of items is zero, then there is no percentile.
        let num_items = self.sum();
        if num_items == 0 {
            return Ok(None);
        }

        // (3) Some simple math to figure out how many items constitutes the
        // nth percentile.
        let needed_items = percentile * num_items as f64;

        // (4) Simple algorithm to calculate the percentile: starting at the
        // lowest occupied bin of the histogram, slowly step through the bins
        // until we have collected `needed_items`.
        let mut collected_items = 0.0;
        let mut iter = self.values.iter();

        while let Some((bin, count)) = iter.next() {
            // (4a) Increment the collected items amount by the current bin we
            // are looking at
            collected_items += *count as f64;

            // (4b) If the number of collected items eclipses the number of
            // needed items, then we've found our answer!
            if collected_items > needed_items {
                return Ok(Some(*bin as f64));
            }

            // (4c) If the number of collected items equals the number of
            // needed items, then we have a runoff! Technically, the right way
            // to handle this is to find the next occupied bin and take the
            // middle of the two (even though that doesn't appear in the set
            // necessarily). So that's what we do here!
            if collected_items == needed_items {
                let lowest = *bin as f64;
                let highest = match iter.find(|(_, count)| **count > 0) {
                    Some((next, _)) => *next as f64,
                    // Runoff on the largest occupied bin: there is nothing
                    // above to split with.
                    None => lowest,
                };

                return Ok(Some(lowest + ((highest - lowest) / 2.0)));
            }
        }

        // Unreachable as long as num_items > 0, which was checked in (2).
        Ok(None)
    }

    /// Computes the first quartile of the distribution.
    pub fn first_quartile(&self) -> Option<f64> {
        self.percentile(0.25).unwrap()
    }

    /// Computes the median (second quartile) of the distribution.
    pub fn median(&self) -> Option<f64> {
        self.percentile(0.5).unwrap()
    }

    /// Computes the third quartile of the distribution.
    pub fn third_quartile(&self) -> Option<f64> {
        self.percentile(0.75).unwrap()
    }

    /// Computes the interquartile range for this distribution.
    pub fn interquartile_range(&self) -> Option<f64> {
        if let Some(first) = self.first_quartile() {
            if let Some(third) = self.third_quartile() {
                return Some(third - first);
            }
        }

        None
    }
}

impl fmt::Display for Histogram {
    /// Renders the compact, one-line summary of the distribution used within
    /// the textual per-read-group report.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.min(), self.max(), self.median()) {
            (Some(min), Some(max), Some(median)) => write!(
                f,
                "n={}, mean={:.2}, median={}, min={}, max={}",
                self.sum(),
                self.mean(),
                median,
                min,
                max
            ),
            _ => write!(f, "n=0"),
        }
    }
}
