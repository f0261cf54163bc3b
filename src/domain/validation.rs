/// Suffixes accepted on byte quantities (memory and storage).
const BYTE_SUFFIXES: [&str; 13] =
    ["Ki", "Mi", "Gi", "Ti", "Pi", "Ei", "k", "K", "M", "G", "T", "P", "E"];

/// Validates a non-negative decimal number (`2`, `0.5`, `.5` is rejected).
fn is_decimal(text: &str) -> bool {
    let (int, frac) = match text.split_once('.') {
        Some((int, frac)) => (int, Some(frac)),
        None => (text, None),
    };
    if int.is_empty() || !int.chars().all(|c| c.is_ascii_digit()) {
        return false;
    }
    match frac {
        Some(frac) => !frac.is_empty() && frac.chars().all(|c| c.is_ascii_digit()),
        None => true,
    }
}

/// Validates a byte quantity such as `128Mi`, `8G` or `0.5Ti`.
///
/// Checks:
/// - Leading non-negative decimal number
/// - At most one binary (`Ki`..`Ei`) or decimal (`k`, `K`, `M`..`E`) suffix
pub fn validate_byte_quantity(text: &str) -> bool {
    let number = BYTE_SUFFIXES
        .iter()
        .find_map(|suffix| text.strip_suffix(suffix))
        .unwrap_or(text);
    is_decimal(number)
}

/// Validates a CPU quantity such as `0.1`, `2` or `100m`.
pub fn validate_cpu_quantity(text: &str) -> bool {
    match text.strip_suffix('m') {
        Some(millis) => !millis.is_empty() && millis.chars().all(|c| c.is_ascii_digit()),
        None => is_decimal(text),
    }
}

/// Validates a fully qualified domain name (`web.example.com`).
///
/// Checks:
/// - At least two dot-separated labels
/// - Each label is 1-63 alphanumerics or `-`, not starting or ending with `-`
/// - Total length at most 253
pub fn validate_domain_name(text: &str) -> bool {
    if text.is_empty() || text.len() > 253 {
        return false;
    }
    let labels: Vec<&str> = text.split('.').collect();
    if labels.len() < 2 {
        return false;
    }
    labels.iter().all(|label| {
        !label.is_empty()
            && label.len() <= 63
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
    })
}

#[macro_export]
macro_rules! impl_validated_quantity {
    ($name:ident, $validator:path, $expected:expr) => {
        impl $name {
            /// Human-readable description of the accepted format.
            pub const EXPECTED: &'static str = $expected;

            /// Validate and create a new instance; `field` names the value in errors.
            pub fn parse(field: &str, text: &str) -> Result<Self, $crate::domain::AppError> {
                let text = text.trim();
                if $validator(text) {
                    Ok(Self(text.to_string()))
                } else {
                    Err($crate::domain::AppError::validation(field, text, $expected))
                }
            }

            /// Return the inner string value.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}
