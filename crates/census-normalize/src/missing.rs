//! Sentinel missing-code replacement for ACS estimate columns.

use polars::prelude::*;

/// Sentinel codes the ACS uses in place of a real estimate, one per
/// missing-data reason.
pub const ACS_MISSING: [i64; 6] = [
    -999_999_999,
    -888_888_888,
    -666_666_666,
    -555_555_555,
    -333_333_333,
    -222_222_222,
];

/// Replaces every ACS sentinel code in `column` with a null.
///
/// Integer and float columns are rewritten; any other dtype cannot hold
/// the sentinel values and passes through untouched. The column keeps its
/// name and dtype, and values that are not sentinel codes (nulls
/// included) are preserved as-is.
pub fn replace_missing(column: Series) -> Series {
    let nulls_before = column.null_count();
    let dtype = column.dtype().clone();

    let out = match dtype {
        DataType::Int64 => replace_in_i64(&column).unwrap_or(column),
        DataType::Int32 => replace_in_i32(&column).unwrap_or(column),
        DataType::Float64 => replace_in_f64(&column).unwrap_or(column),
        DataType::Float32 => replace_in_f32(&column).unwrap_or(column),
        _ => return column,
    };

    let replaced = out.null_count().saturating_sub(nulls_before);
    if replaced > 0 {
        tracing::debug!(
            column = %out.name(),
            replaced,
            "replaced sentinel missing codes with null"
        );
    }
    out
}

fn replace_in_i64(column: &Series) -> PolarsResult<Series> {
    let replaced: Vec<Option<i64>> = column
        .i64()?
        .iter()
        .map(|value| value.filter(|v| !ACS_MISSING.contains(v)))
        .collect();
    Ok(Series::new(column.name().clone(), replaced))
}

fn replace_in_i32(column: &Series) -> PolarsResult<Series> {
    let replaced: Vec<Option<i32>> = column
        .i32()?
        .iter()
        .map(|value| value.filter(|v| !ACS_MISSING.contains(&i64::from(*v))))
        .collect();
    Ok(Series::new(column.name().clone(), replaced))
}

fn replace_in_f64(column: &Series) -> PolarsResult<Series> {
    let replaced: Vec<Option<f64>> = column
        .f64()?
        .iter()
        .map(|value| value.filter(|v| !is_sentinel_f64(*v)))
        .collect();
    Ok(Series::new(column.name().clone(), replaced))
}

fn replace_in_f32(column: &Series) -> PolarsResult<Series> {
    let replaced: Vec<Option<f32>> = column
        .f32()?
        .iter()
        .map(|value| value.filter(|v| !is_sentinel_f32(*v)))
        .collect();
    Ok(Series::new(column.name().clone(), replaced))
}

/// Sentinel comparison for float columns, where codes arrive as whole
/// float values after an earlier cast.
fn is_sentinel_f64(value: f64) -> bool {
    ACS_MISSING.iter().any(|&code| value == code as f64)
}

/// The widest sentinels round when stored as `f32`, so the comparison has
/// to happen in `f32` space as well.
fn is_sentinel_f32(value: f32) -> bool {
    ACS_MISSING.iter().any(|&code| value == code as f32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replaces_every_sentinel_code() {
        let column = Series::new("estimate".into(), ACS_MISSING.to_vec());
        let replaced = replace_missing(column);

        assert_eq!(replaced.null_count(), 6);
        assert_eq!(replaced.dtype(), &DataType::Int64);
        assert_eq!(replaced.name().as_str(), "estimate");
    }

    #[test]
    fn keeps_ordinary_values_in_place() {
        let column = Series::new(
            "estimate".into(),
            vec![5_i64, -999_999_999, 10, -666_666_666],
        );
        let replaced = replace_missing(column);

        let values: Vec<Option<i64>> = replaced.i64().unwrap().iter().collect();
        assert_eq!(values, vec![Some(5), None, Some(10), None]);
    }

    #[test]
    fn near_sentinel_values_survive() {
        let column = Series::new(
            "estimate".into(),
            vec![-999_999_998_i64, -222_222_221, -1],
        );
        let replaced = replace_missing(column);
        assert_eq!(replaced.null_count(), 0);
    }

    #[test]
    fn existing_nulls_are_preserved() {
        let column = Series::new(
            "estimate".into(),
            vec![Some(7_i64), None, Some(-888_888_888)],
        );
        let replaced = replace_missing(column);

        let values: Vec<Option<i64>> = replaced.i64().unwrap().iter().collect();
        assert_eq!(values, vec![Some(7), None, None]);
    }

    #[test]
    fn float_columns_are_rewritten() {
        let column = Series::new(
            "moe".into(),
            vec![1.5_f64, -999_999_999.0, 2.5, -555_555_555.0],
        );
        let replaced = replace_missing(column);

        assert_eq!(replaced.dtype(), &DataType::Float64);
        assert_eq!(replaced.null_count(), 2);
        let values: Vec<Option<f64>> = replaced.f64().unwrap().iter().collect();
        assert_eq!(values, vec![Some(1.5), None, Some(2.5), None]);
    }

    #[test]
    fn narrow_numeric_dtypes_are_covered() {
        let column = Series::new("code".into(), vec![-222_222_222_i32, 4]);
        let replaced = replace_missing(column);
        assert_eq!(replaced.dtype(), &DataType::Int32);
        assert_eq!(replaced.null_count(), 1);
    }

    #[test]
    fn string_columns_pass_through() {
        let column = Series::new("name".into(), &["Alpha", "-999999999"]);
        let replaced = replace_missing(column.clone());

        assert_eq!(replaced.null_count(), 0);
        assert!(replaced.equals(&column));
    }

    #[test]
    fn boolean_columns_pass_through() {
        let column = Series::new("flag".into(), vec![true, false]);
        let replaced = replace_missing(column.clone());
        assert!(replaced.equals(&column));
    }
}
