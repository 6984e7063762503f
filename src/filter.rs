//! Crop/disease/date-range predicates over the reconciled dataset. This is
//! the display layer's view of the data; it never mutates the collection.

use chrono::NaiveDate;

use crate::core::Observation;

/// `None` on a field means "All" in the original tracker's dropdowns.
#[derive(Debug, Clone, Default)]
pub struct SurveyFilter {
    pub crop: Option<String>,
    pub disease: Option<String>,
    pub date_range: Option<(NaiveDate, NaiveDate)>,
}

impl SurveyFilter {
    pub fn matches(&self, obs: &Observation) -> bool {
        if let Some(crop) = &self.crop {
            if &obs.crop != crop {
                return false;
            }
        }

        // The tracker filters on the primary disease slot.
        if let Some(disease) = &self.disease {
            if &obs.disease1 != disease {
                return false;
            }
        }

        if let Some((from, to)) = self.date_range {
            match obs.date {
                Some(date) => {
                    if date < from || date > to {
                        return false;
                    }
                }
                // Unparsable dates cannot satisfy a date-range filter.
                None => return false,
            }
        }

        true
    }

    pub fn apply(&self, observations: &[Observation]) -> Vec<Observation> {
        observations.iter().filter(|obs| self.matches(obs)).cloned().collect()
    }
}
