// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use crate::Error;

/// Upper bound for the bins count.
pub const MAX_BINS: usize = 1 << 20;

/// Objects grouped into equal-width bins.
#[derive(Clone, PartialEq, Debug)]
pub struct Bins<T> {
    /// Number of bins.
    pub n_bins: usize,
    /// Bin width.
    pub dv: f64,
    /// Bin centers, ascending.
    pub centers: Vec<f64>,
    /// Objects of each bin, in input order.
    pub contents: Vec<Vec<T>>,
}

/// Groups `objects` into bins by the matching `values`.
///
/// Either `n_bins` or `dv` must be set. When both are set, `dv` is used and
/// a warning is emitted. A bin width derived from `n_bins` is
/// `(max - min) / (n_bins - 1)`, a bins count derived from `dv` is
/// `round((max - min) / dv) + 1`.
///
/// The range is padded by half a bin on each side, so `min` and `max` fall
/// into the middle of the first and the last bin.
///
/// The bins count is limited by [`MAX_BINS`].
pub fn bin_objects_1d<T>(
    values: &[f64],
    objects: Vec<T>,
    n_bins: Option<usize>,
    dv: Option<f64>,
) -> Result<Bins<T>, Error> {
    if values.is_empty() {
        return Err(Error::InvalidBinning("no values"));
    }

    if values.len() != objects.len() {
        return Err(Error::InvalidBinning("values and objects count mismatch"));
    }

    if values.iter().any(|v| !v.is_finite()) {
        return Err(Error::InvalidBinning("non-finite value"));
    }

    let v_min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let v_max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    let (n_bins, dv) = match (n_bins, dv) {
        (n_bins, Some(dv)) => {
            if n_bins.is_some() {
                log::warn!("Both bins count and width are set. The count is overridden.");
            }

            if !(dv.is_finite() && dv > 0.0) {
                return Err(Error::InvalidBinning("bin width must be positive"));
            }

            let n_bins = ((v_max - v_min) / dv).round() + 1.0;
            if !(n_bins.is_finite() && n_bins <= MAX_BINS as f64) {
                return Err(Error::InvalidBinning("too many bins"));
            }

            (n_bins as usize, dv)
        }
        (Some(n_bins), None) => {
            if n_bins < 2 {
                return Err(Error::InvalidBinning("at least two bins are required"));
            }

            if n_bins > MAX_BINS {
                return Err(Error::InvalidBinning("too many bins"));
            }

            let dv = (v_max - v_min) / (n_bins - 1) as f64;
            if !dv.is_finite() {
                return Err(Error::InvalidBinning("value range is too large"));
            }

            if dv <= 0.0 {
                return Err(Error::InvalidBinning("zero value range requires a bin width"));
            }

            (n_bins, dv)
        }
        (None, None) => {
            return Err(Error::InvalidBinning("neither bins count nor width is set"));
        }
    };

    let v_min = v_min - 0.5 * dv;

    let centers = (0..n_bins)
        .map(|i| v_min + (i as f64 + 0.5) * dv)
        .collect();
    let mut contents: Vec<Vec<T>> = (0..n_bins).map(|_| Vec::new()).collect();

    for (v, object) in values.iter().zip(objects) {
        let idx = ((v - v_min) / dv).floor();
        // Float rounding can push the maximum value one bin too far.
        let idx = if idx > 0.0 {
            (idx as usize).min(n_bins - 1)
        } else {
            0
        };
        contents[idx].push(object);
    }

    Ok(Bins {
        n_bins,
        dv,
        centers,
        contents,
    })
}
