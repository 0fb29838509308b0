//! Status helper enums mapping to SMALLSERIAL lookup tables.
//!
//! Each enum variant's discriminant matches the seed data order (1-based)
//! in the corresponding `*_statuses` database table.

/// Status ID type matching SMALLINT/SMALLSERIAL in the database.
pub type StatusId = i16;

macro_rules! define_status_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident = $val:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[repr(i16)]
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub enum $name {
            $( $(#[$vmeta])* $variant = $val ),+
        }

        impl $name {
            /// Return the database status ID.
            pub fn id(self) -> StatusId {
                self as StatusId
            }

            /// Look up a variant by database status ID.
            pub fn from_id(id: StatusId) -> Option<Self> {
                match id {
                    $( $val => Some($name::$variant), )+
                    _ => None,
                }
            }
        }

        impl From<$name> for StatusId {
            fn from(value: $name) -> Self {
                value as StatusId
            }
        }
    };
}

define_status_enum! {
    /// Campaign-day lifecycle status.
    CampaignDayStatus {
        Planning = 1,
        Active = 2,
        Completed = 3,
        Archived = 4,
    }
}

#[cfg(test)]
mod tests {
    use blitz_core::outreach::lifecycle;

    use super::*;

    #[test]
    fn ids_match_core_lifecycle_constants() {
        assert_eq!(CampaignDayStatus::Planning.id(), lifecycle::PLANNING);
        assert_eq!(CampaignDayStatus::Active.id(), lifecycle::ACTIVE);
        assert_eq!(CampaignDayStatus::Completed.id(), lifecycle::COMPLETED);
        assert_eq!(CampaignDayStatus::Archived.id(), lifecycle::ARCHIVED);
    }

    #[test]
    fn from_id_round_trips() {
        assert_eq!(CampaignDayStatus::from_id(2), Some(CampaignDayStatus::Active));
        assert_eq!(CampaignDayStatus::from_id(9), None);
    }
}
