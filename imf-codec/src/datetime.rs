use imf_types::datetime::DateTime;
use nom::combinator::{map_res, rest};

use crate::decode::IMFResult;

/// ```abnf
/// date-time = [ day-of-week "," ] date time [CFWS]
/// ```
///
/// Consumes all input. The grammar itself is implemented by [`DateTime`].
pub(crate) fn date_time(input: &[u8]) -> IMFResult<&[u8], DateTime> {
    map_res(rest, |raw: &[u8]| DateTime::try_from(raw))(input)
}
