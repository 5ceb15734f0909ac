//! Issuer auto-detection from first-page text.

use crate::catalog::ProfileSet;
use crate::error::ProfileNotIdentified;
use crate::profile::Profile;

/// Pick the first profile (in catalog order) whose identifier appears in
/// the first page's full text. Deterministic: same text and same catalog
/// order always give the same answer.
pub fn resolve<'a>(
    first_page_text: &str,
    profiles: &'a ProfileSet,
) -> Result<&'a Profile, ProfileNotIdentified> {
    profiles
        .all()
        .map(|(_, profile)| profile)
        .find(|profile| first_page_text.contains(&profile.identifier))
        .ok_or(ProfileNotIdentified)
}
