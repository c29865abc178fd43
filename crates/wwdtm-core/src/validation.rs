//! ID validation.
//!
//! Every table in the stats database uses a signed 32-bit integer key, so a
//! usable ID is anything that converts losslessly into `0..=i32::MAX`.
//! Booleans are never IDs: there is no [`IdCandidate`] impl for `bool`, and a
//! JSON `true`/`false` is rejected at runtime.

/// Largest value a stats database ID column can hold.
pub const MAX_ID: i64 = i32::MAX as i64;

/// A value that may or may not describe a database ID.
pub trait IdCandidate {
  /// The candidate as an integer, if it converts without loss.
  fn as_id(&self) -> Option<i64>;
}

macro_rules! impl_id_candidate_int {
  ($($t:ty),* $(,)?) => {
    $(
      impl IdCandidate for $t {
        fn as_id(&self) -> Option<i64> { i64::try_from(*self).ok() }
      }
    )*
  };
}

impl_id_candidate_int!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

impl IdCandidate for str {
  fn as_id(&self) -> Option<i64> { self.trim().parse().ok() }
}

impl IdCandidate for String {
  fn as_id(&self) -> Option<i64> { self.as_str().as_id() }
}

impl<T: IdCandidate + ?Sized> IdCandidate for &T {
  fn as_id(&self) -> Option<i64> { (**self).as_id() }
}

impl<T: IdCandidate> IdCandidate for Option<T> {
  fn as_id(&self) -> Option<i64> { self.as_ref().and_then(IdCandidate::as_id) }
}

impl IdCandidate for serde_json::Value {
  fn as_id(&self) -> Option<i64> {
    match self {
      serde_json::Value::Number(n) => n.as_i64(),
      serde_json::Value::String(s) => s.as_id(),
      // Bool, Null, Array, Object
      _ => None,
    }
  }
}

/// Returns `true` if `candidate` is an integer in `0..=2^31 - 1`.
pub fn valid_id<T: IdCandidate + ?Sized>(candidate: &T) -> bool {
  candidate
    .as_id()
    .is_some_and(|id| (0..=MAX_ID).contains(&id))
}
