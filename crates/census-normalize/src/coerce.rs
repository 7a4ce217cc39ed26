//! Best-effort dtype coercion helpers.

use polars::prelude::*;

/// Casts `column` to `kind`, returning the input unchanged when the
/// conversion does not fully succeed.
///
/// Survey extracts arrive with every column typed as whatever the reader
/// guessed, so callers try the dtype they want and keep whatever comes
/// back. A cast that silently nulls out unparseable values counts as a
/// failure here; the column is only swapped when every value converted.
pub fn coerce(column: Series, kind: &DataType) -> Series {
    match column.cast(kind) {
        Ok(converted) if converted.null_count() == column.null_count() => converted,
        Ok(_) => {
            tracing::debug!(
                column = %column.name(),
                target = ?kind,
                "cast dropped values; keeping column unchanged"
            );
            column
        }
        Err(error) => {
            tracing::debug!(
                column = %column.name(),
                target = ?kind,
                %error,
                "cast failed; keeping column unchanged"
            );
            column
        }
    }
}

/// True when `ch` on its own parses as an integer.
///
/// # Examples
///
/// ```
/// use census_normalize::can_int;
///
/// assert!(can_int('7'));
/// assert!(!can_int('x'));
/// assert!(!can_int('-'));
/// ```
#[must_use]
pub fn can_int(ch: char) -> bool {
    ch.is_ascii_digit()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn casts_clean_string_columns() {
        let column = Series::new("estimate".into(), &["1500", "-999999999", "2400"]);
        let coerced = coerce(column, &DataType::Int64);

        assert_eq!(coerced.dtype(), &DataType::Int64);
        let values: Vec<Option<i64>> = coerced.i64().unwrap().iter().collect();
        assert_eq!(values, vec![Some(1500), Some(-999_999_999), Some(2400)]);
    }

    #[test]
    fn unparseable_values_keep_the_column_unchanged() {
        let column = Series::new("estimate".into(), &["1500", "n/a", "2400"]);
        let coerced = coerce(column.clone(), &DataType::Int64);

        assert_eq!(coerced.dtype(), &DataType::String);
        assert!(coerced.equals(&column));
    }

    #[test]
    fn fractional_text_does_not_become_an_integer() {
        let column = Series::new("rate".into(), &["12.5", "13.0"]);
        let coerced = coerce(column.clone(), &DataType::Int64);
        assert!(coerced.equals(&column));

        let as_float = coerce(column, &DataType::Float64);
        assert_eq!(as_float.dtype(), &DataType::Float64);
        let values: Vec<Option<f64>> = as_float.f64().unwrap().iter().collect();
        assert_eq!(values, vec![Some(12.5), Some(13.0)]);
    }

    #[test]
    fn widening_numeric_casts_succeed() {
        let column = Series::new("count".into(), vec![1_i64, 2, 3]);
        let coerced = coerce(column, &DataType::Float64);

        assert_eq!(coerced.dtype(), &DataType::Float64);
        let values: Vec<Option<f64>> = coerced.f64().unwrap().iter().collect();
        assert_eq!(values, vec![Some(1.0), Some(2.0), Some(3.0)]);
    }

    #[test]
    fn existing_nulls_do_not_count_as_failures() {
        let column = Series::new("estimate".into(), vec![Some("1"), None, Some("3")]);
        let coerced = coerce(column, &DataType::Int64);

        assert_eq!(coerced.dtype(), &DataType::Int64);
        assert_eq!(coerced.null_count(), 1);
    }

    #[test]
    fn identity_cast_is_a_no_op() {
        let column = Series::new("count".into(), vec![1_i64, 2]);
        let coerced = coerce(column.clone(), &DataType::Int64);
        assert!(coerced.equals(&column));
    }

    #[test]
    fn digits_can_int() {
        for ch in '0'..='9' {
            assert!(can_int(ch));
        }
    }

    #[test]
    fn non_digits_cannot_int() {
        for ch in ['a', 'Z', ' ', '-', '+', '.', ',', '³', '٣'] {
            assert!(!can_int(ch), "{ch:?} should not count as an integer");
        }
    }
}
