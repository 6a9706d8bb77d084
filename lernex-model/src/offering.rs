use crate::ids::{ClassGroupID, CourseID, MentorshipID};
use uuid::Uuid;

/// Kind discriminant for an [`Offering`], matching the persisted
/// `offering_kind` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum OfferingKind {
    Course,
    Mentorship,
    ClassGroup,
}

impl OfferingKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            OfferingKind::Course => "course",
            OfferingKind::Mentorship => "mentorship",
            OfferingKind::ClassGroup => "class_group",
        }
    }
}

impl std::fmt::Display for OfferingKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Something a user can enroll in: a course, a mentorship, or a class group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Offering {
    Course(CourseID),
    Mentorship(MentorshipID),
    ClassGroup(ClassGroupID),
}

impl Offering {
    pub fn kind(&self) -> OfferingKind {
        match self {
            Offering::Course(_) => OfferingKind::Course,
            Offering::Mentorship(_) => OfferingKind::Mentorship,
            Offering::ClassGroup(_) => OfferingKind::ClassGroup,
        }
    }

    pub fn as_uuid(&self) -> &Uuid {
        match self {
            Offering::Course(id) => id.as_uuid(),
            Offering::Mentorship(id) => id.as_uuid(),
            Offering::ClassGroup(id) => id.as_uuid(),
        }
    }

    pub fn to_uuid(&self) -> Uuid {
        *self.as_uuid()
    }

    /// Whether a completion certificate can be issued for this offering.
    ///
    /// Certificates carry a course or class-group column; mentorships have
    /// no certificate representation.
    pub fn certifiable(&self) -> bool {
        !matches!(self, Offering::Mentorship(_))
    }

    /// Reassemble an offering from its persisted (kind, uuid) pair.
    pub fn from_parts(kind: OfferingKind, id: Uuid) -> Self {
        match kind {
            OfferingKind::Course => Offering::Course(CourseID(id)),
            OfferingKind::Mentorship => Offering::Mentorship(MentorshipID(id)),
            OfferingKind::ClassGroup => Offering::ClassGroup(ClassGroupID(id)),
        }
    }
}

impl std::fmt::Display for Offering {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Offering::Course(id) => write!(f, "course({id})"),
            Offering::Mentorship(id) => write!(f, "mentorship({id})"),
            Offering::ClassGroup(id) => write!(f, "class_group({id})"),
        }
    }
}

impl From<CourseID> for Offering {
    fn from(id: CourseID) -> Self {
        Offering::Course(id)
    }
}

impl From<MentorshipID> for Offering {
    fn from(id: MentorshipID) -> Self {
        Offering::Mentorship(id)
    }
}

impl From<ClassGroupID> for Offering {
    fn from(id: ClassGroupID) -> Self {
        Offering::ClassGroup(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_parts() {
        let offering = Offering::ClassGroup(ClassGroupID::new());
        let rebuilt = Offering::from_parts(offering.kind(), offering.to_uuid());
        assert_eq!(offering, rebuilt);
    }

    #[test]
    fn mentorships_are_not_certifiable() {
        assert!(Offering::Course(CourseID::new()).certifiable());
        assert!(Offering::ClassGroup(ClassGroupID::new()).certifiable());
        assert!(!Offering::Mentorship(MentorshipID::new()).certifiable());
    }
}
