use {
  super::*, crate::custom_serde::IsoTimestampSerde, async_trait::async_trait, tokio_postgres::Row,
  utoipa::ToSchema,
};

pub(super) const SELECT_INSCRIPTIONS_PAGE: &str = "SELECT slot, signature, account, \
    metadata_account, authority, data, write_version, updated_on \
  FROM inscriptions \
  ORDER BY updated_on DESC \
  LIMIT $1 OFFSET $2";

const DEFAULT_PAGE_LIMIT: i64 = 20;

pub const DEFAULT_PAGE_SIZE: u64 = DEFAULT_PAGE_LIMIT.unsigned_abs();

/// One row of the `inscriptions` table, as written by the indexing plugin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Inscription {
  /// Slot of the transaction that wrote the inscription data.
  pub slot: i64,
  /// Base58 transaction signature.
  pub signature: String,
  /// Base58 inscription account.
  pub account: String,
  /// Base58 inscription metadata account.
  pub metadata_account: String,
  /// Base58 authority that signed the write.
  pub authority: String,
  /// Inscription payload decoded as text.
  #[schema(value_type = Option<String>)]
  pub data: Option<ByteaText>,
  /// Orders writes within a slot.
  pub write_version: Option<i64>,
  /// When the row was last written, in UTC.
  #[serde(with = "IsoTimestampSerde")]
  #[schema(value_type = String, example = "2024-01-02T03:04:05.678Z")]
  pub updated_on: NaiveDateTime,
}

impl TryFrom<&Row> for Inscription {
  type Error = tokio_postgres::Error;

  fn try_from(row: &Row) -> Result<Self, Self::Error> {
    Ok(Self {
      slot: row.try_get("slot")?,
      signature: row.try_get("signature")?,
      account: row.try_get("account")?,
      metadata_account: row.try_get("metadata_account")?,
      authority: row.try_get("authority")?,
      data: row.try_get("data")?,
      write_version: row.try_get("write_version")?,
      updated_on: row.try_get("updated_on")?,
    })
  }
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum PageError {
  #[error("pageSize must be at least 1")]
  EmptyPage,

  #[error("pageIndex {index} with pageSize {size} is out of range")]
  OutOfRange { index: u64, size: u64 },
}

/// A zero based page of inscriptions, newest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
  index: u64,
  size: u64,
  limit: i64,
  offset: i64,
}

impl Page {
  pub fn new(index: u64, size: u64) -> Result<Self, PageError> {
    if size == 0 {
      return Err(PageError::EmptyPage);
    }

    let out_of_range = || PageError::OutOfRange { index, size };

    let limit = i64::try_from(size).map_err(|_| out_of_range())?;
    let offset = index
      .checked_mul(size)
      .and_then(|offset| i64::try_from(offset).ok())
      .ok_or_else(out_of_range)?;

    Ok(Self {
      index,
      size,
      limit,
      offset,
    })
  }

  pub fn index(&self) -> u64 {
    self.index
  }

  pub fn size(&self) -> u64 {
    self.size
  }

  /// Rows to return, as a `bigint` query parameter.
  pub fn limit(&self) -> i64 {
    self.limit
  }

  /// Rows to skip, as a `bigint` query parameter.
  pub fn offset(&self) -> i64 {
    self.offset
  }
}

impl Default for Page {
  fn default() -> Self {
    Self {
      index: 0,
      size: DEFAULT_PAGE_SIZE,
      limit: DEFAULT_PAGE_LIMIT,
      offset: 0,
    }
  }
}

impl Display for Page {
  fn fmt(&self, f: &mut Formatter) -> fmt::Result {
    write!(f, "pageIndex={} pageSize={}", self.index, self.size)
  }
}

#[async_trait]
pub trait InscriptionReader: Send + Sync {
  /// Returns at most `page.size()` inscriptions ordered by `updated_on`
  /// descending, after skipping `page.index() * page.size()` rows.
  async fn inscriptions_by_page(&self, page: Page) -> Result<Vec<Inscription>, Error>;
}

#[async_trait]
impl InscriptionReader for Database {
  async fn inscriptions_by_page(&self, page: Page) -> Result<Vec<Inscription>, Error> {
    let (limit, offset) = (page.limit(), page.offset());

    let rows = self
      .client
      .query(&self.select_inscriptions_page, &[&limit, &offset])
      .await?;

    rows
      .iter()
      .map(Inscription::try_from)
      .collect::<Result<Vec<_>, _>>()
      .map_err(Error::Query)
  }
}
