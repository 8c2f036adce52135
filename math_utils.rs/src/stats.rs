use std::cmp::Ordering;

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatisticsError {
	#[error("common stats are undefined on empty series")]
	EmptySeries,
}

/// Arithmetic mean of a series.
///
/// # Errors
/// - on empty series
#[allow(clippy::cast_precision_loss)]
pub fn mean(series: &[f64]) -> Result<f64, StatisticsError> {
	if series.is_empty() {
		Err(StatisticsError::EmptySeries)
	} else {
		Ok(series.iter().sum::<f64>() / series.len() as f64)
	}
}

/// Index of the greatest value in the series. Ties resolve to the first occurrence,
/// values that can't be compared (NaN) are never selected over a comparable one.
///
/// Returns `None` on empty series.
///
/// ```
/// use math_utils::stats::arg_max;
///
/// assert_eq!(arg_max([1., 3., 2., 3.]), Some(1));
/// assert_eq!(arg_max(std::iter::empty::<f64>()), None);
/// ```
pub fn arg_max<Series: IntoIterator<Item = f64>>(series: Series) -> Option<usize> {
	let mut best: Option<(usize, f64)> = None;
	for (i, value) in series.into_iter().enumerate() {
		match best {
			None => best = Some((i, value)),
			Some((_, cur)) => {
				if value.partial_cmp(&cur) == Some(Ordering::Greater) || (cur.is_nan() && !value.is_nan()) {
					best = Some((i, value));
				}
			}
		}
	}
	best.map(|(i, _)| i)
}
