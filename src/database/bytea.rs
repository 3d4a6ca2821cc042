use {
  super::*,
  bytes::BytesMut,
  postgres_types::{to_sql_checked, FromSql, IsNull, ToSql, Type},
  std::error::Error as StdError,
};

/// Text stored in a `bytea` column.
///
/// Writing strips a leading `0x` and stores the UTF-8 bytes of what remains.
/// The remainder is not hex decoded, so `0x6869` is stored as the four bytes
/// `6869`, not as `hi`. Reading decodes the bytes as UTF-8 text, and any
/// column that is not `bytea` reads as the empty string.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ByteaText(String);

impl ByteaText {
  pub fn encode(&self) -> Vec<u8> {
    self
      .0
      .strip_prefix("0x")
      .unwrap_or(self.0.as_str())
      .as_bytes()
      .to_vec()
  }

  pub fn decode(raw: &[u8]) -> Self {
    Self(String::from_utf8_lossy(raw).into_owned())
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl From<&str> for ByteaText {
  fn from(text: &str) -> Self {
    Self(text.into())
  }
}

impl From<String> for ByteaText {
  fn from(text: String) -> Self {
    Self(text)
  }
}

impl Display for ByteaText {
  fn fmt(&self, f: &mut Formatter) -> fmt::Result {
    f.write_str(&self.0)
  }
}

impl<'a> FromSql<'a> for ByteaText {
  fn from_sql(ty: &Type, raw: &'a [u8]) -> Result<Self, Box<dyn StdError + Sync + Send>> {
    if *ty == Type::BYTEA {
      Ok(Self::decode(raw))
    } else {
      Ok(Self::default())
    }
  }

  fn accepts(_: &Type) -> bool {
    true
  }
}

impl ToSql for ByteaText {
  fn to_sql(&self, _: &Type, out: &mut BytesMut) -> Result<IsNull, Box<dyn StdError + Sync + Send>> {
    out.extend_from_slice(&self.encode());
    Ok(IsNull::No)
  }

  fn accepts(ty: &Type) -> bool {
    *ty == Type::BYTEA
  }

  to_sql_checked!();
}
