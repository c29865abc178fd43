//! Lookup methods shared by every slug-addressable accessor.
//!
//! An accessor supplies its id lookup and, where it has one, its details
//! composition. Slug and random lookups resolve to an id first and delegate.

use crate::{Result, SlugUtility};

/// An accessor whose records are addressed by id or slug.
pub trait SlugAccessor {
  type Info;

  fn utility(&self) -> &SlugUtility;

  fn retrieve_by_id(&self, id: i64) -> Result<Option<Self::Info>>;

  /// The effective slug a record is listed under.
  fn slug_of(info: &Self::Info) -> &str;

  fn retrieve_by_slug(&self, slug: &str) -> Result<Option<Self::Info>> {
    self.utility().with_slug(slug, |id| self.retrieve_by_id(id))
  }

  /// A random id, never a placeholder row.
  fn retrieve_random_id(&self) -> Result<Option<i64>> { self.utility().random_id() }

  fn retrieve_random(&self) -> Result<Option<Self::Info>> {
    match self.retrieve_random_id()? {
      Some(id) => self.retrieve_by_id(id),
      None => Ok(None),
    }
  }

  fn retrieve_random_slug(&self) -> Result<Option<String>> {
    Ok(self.retrieve_random()?.map(|info| Self::slug_of(&info).to_owned()))
  }
}

/// A [`SlugAccessor`] whose records expand into a details record that nests
/// their appearances.
pub trait DetailsAccessor: SlugAccessor {
  type Details;

  fn details(&self, info: Self::Info) -> Result<Self::Details>;

  fn retrieve_details_by_id(&self, id: i64) -> Result<Option<Self::Details>> {
    self.retrieve_by_id(id)?.map(|info| self.details(info)).transpose()
  }

  fn retrieve_details_by_slug(&self, slug: &str) -> Result<Option<Self::Details>> {
    self.utility().with_slug(slug, |id| self.retrieve_details_by_id(id))
  }

  fn retrieve_random_details(&self) -> Result<Option<Self::Details>> {
    match self.retrieve_random_id()? {
      Some(id) => self.retrieve_details_by_id(id),
      None => Ok(None),
    }
  }
}
