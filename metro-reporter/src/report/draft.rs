//! The report being filled in.

use crate::domain::{Category, Coordinate, RankedStation};

use super::error::ValidationError;
use super::types::{Photo, ReportSubmission};

/// Maximum number of photos per report.
pub const MAX_PHOTOS: usize = 6;

/// Form state that is not owned by the suggestion controller.
#[derive(Debug, Clone, Default)]
pub struct ReportDraft {
    photos: Vec<Photo>,
    category: Option<Category>,
    description: String,
}

impl ReportDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach photos up to [`MAX_PHOTOS`]. Returns how many were added.
    pub fn add_photos(&mut self, photos: impl IntoIterator<Item = Photo>) -> usize {
        let free = MAX_PHOTOS.saturating_sub(self.photos.len());
        let before = self.photos.len();
        self.photos.extend(photos.into_iter().take(free));
        self.photos.len() - before
    }

    /// Detach the photo at `index`.
    pub fn remove_photo(&mut self, index: usize) -> Option<Photo> {
        (index < self.photos.len()).then(|| self.photos.remove(index))
    }

    pub fn photos(&self) -> &[Photo] {
        &self.photos
    }

    pub fn set_category(&mut self, category: Category) {
        self.category = Some(category);
    }

    pub fn category(&self) -> Option<Category> {
        self.category
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Drop everything entered so far.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Check the draft and assemble the submission.
    ///
    /// The user's position wins over the station's own coordinate.
    pub fn build(
        &self,
        station: Option<&RankedStation>,
        query: &str,
        location: Option<Coordinate>,
    ) -> Result<ReportSubmission, ValidationError> {
        let mut problems = Vec::new();
        if self.photos.is_empty() {
            problems.push("добавьте хотя бы одну фотографию");
        }
        if self.category.is_none() {
            problems.push("выберите тип дефекта");
        }
        if station.is_none() {
            problems.push("выберите станцию метро");
        }

        let (Some(category), Some(station)) = (self.category, station) else {
            return Err(ValidationError { problems });
        };
        if !problems.is_empty() {
            return Err(ValidationError { problems });
        }

        let station_name = if station.name().is_empty() {
            query.trim().to_string()
        } else {
            station.name().to_string()
        };
        let position = location.or(station.coordinate());

        Ok(ReportSubmission {
            category: category.label().to_string(),
            station: station_name,
            description: self.description.trim().to_string(),
            latitude: position.map(|c| c.lat()),
            longitude: position.map(|c| c.lon()),
            photos: self.photos.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::StationCandidate;

    fn photo(n: usize) -> Photo {
        Photo::new(format!("{n}.jpg"), vec![n as u8])
    }

    fn station() -> RankedStation {
        RankedStation {
            station: StationCandidate::named("Арбатская").with_coordinate(55.7522, 37.6038),
            distance_km: None,
        }
    }

    fn complete() -> ReportDraft {
        let mut draft = ReportDraft::new();
        draft.add_photos([photo(1)]);
        draft.set_category(Category::Seat);
        draft.set_description("  порван чехол  ");
        draft
    }

    #[test]
    fn photo_limit() {
        let mut draft = ReportDraft::new();
        assert_eq!(draft.add_photos((0..4).map(photo)), 4);
        assert_eq!(draft.add_photos((4..10).map(photo)), 2);
        assert_eq!(draft.photos().len(), MAX_PHOTOS);
        assert_eq!(draft.add_photos([photo(11)]), 0);
    }

    #[test]
    fn remove_photo() {
        let mut draft = ReportDraft::new();
        draft.add_photos((0..3).map(photo));
        assert_eq!(draft.remove_photo(1), Some(photo(1)));
        assert_eq!(draft.remove_photo(5), None);
        assert_eq!(draft.photos(), &[photo(0), photo(2)]);
    }

    #[test]
    fn empty_draft_lists_every_problem() {
        let err = ReportDraft::new().build(None, "", None).unwrap_err();
        assert_eq!(
            err.problems,
            vec![
                "добавьте хотя бы одну фотографию",
                "выберите тип дефекта",
                "выберите станцию метро"
            ]
        );
    }

    #[test]
    fn missing_photo_only() {
        let mut draft = complete();
        draft.remove_photo(0);
        let s = station();
        let err = draft.build(Some(&s), "", None).unwrap_err();
        assert_eq!(err.problems, vec!["добавьте хотя бы одну фотографию"]);
    }

    #[test]
    fn builds_submission_with_user_location() {
        let s = station();
        let here = Coordinate::new(55.75, 37.62).unwrap();
        let report = complete().build(Some(&s), "Арбатская", Some(here)).unwrap();

        assert_eq!(report.category, "Сиденье");
        assert_eq!(report.station, "Арбатская");
        assert_eq!(report.description, "порван чехол");
        assert_eq!(report.latitude, Some(55.75));
        assert_eq!(report.longitude, Some(37.62));
        assert_eq!(report.photos.len(), 1);
    }

    #[test]
    fn falls_back_to_station_coordinate() {
        let s = station();
        let report = complete().build(Some(&s), "", None).unwrap();
        assert_eq!(report.latitude, Some(55.7522));
        assert_eq!(report.longitude, Some(37.6038));
    }

    #[test]
    fn no_coordinates_at_all() {
        let s = RankedStation {
            station: StationCandidate::named("Арбатская"),
            distance_km: None,
        };
        let report = complete().build(Some(&s), "", None).unwrap();
        assert!(report.latitude.is_none());
        assert!(report.longitude.is_none());
    }

    #[test]
    fn clear_resets() {
        let mut draft = complete();
        draft.clear();
        assert!(draft.photos().is_empty());
        assert!(draft.category().is_none());
        assert_eq!(draft.description(), "");
    }
}
