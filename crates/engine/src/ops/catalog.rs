//! Read-only access to the catalog (people, planets, vehicles).

use sea_orm::{ConnectionTrait, QueryOrder, prelude::*};

use crate::{EngineError, Person, Planet, ResultEngine, Vehicle, people, planets, vehicles};

use super::Engine;

/// The kinds of catalog entity a user can favorite.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CatalogKind {
    Person,
    Planet,
    Vehicle,
}

impl CatalogKind {
    /// Capitalized name used in client-facing messages.
    pub fn label(self) -> &'static str {
        match self {
            Self::Person => "Person",
            Self::Planet => "Planet",
            Self::Vehicle => "Vehicle",
        }
    }

    pub(super) fn not_found(self) -> EngineError {
        EngineError::NotFound(format!("{} not found", self.label()))
    }
}

/// Generates a listing method and a by-id lookup for one catalog entity.
///
/// The lookup is generic over the connection so that favorites can reuse it
/// inside a transaction.
macro_rules! impl_catalog_reads {
    ($list_fn:ident, $find_fn:ident, $get_fn:ident, $module:ident, $model:ty, $kind:expr) => {
        /// Every record of this kind, by id.
        pub async fn $list_fn(&self) -> ResultEngine<Vec<$model>> {
            $module::Entity::find()
                .order_by_asc($module::Column::Id)
                .all(&self.database)
                .await
                .map_err(Into::into)
        }

        pub(super) async fn $find_fn<C: ConnectionTrait>(
            &self,
            db: &C,
            id: i32,
        ) -> ResultEngine<$model> {
            $module::Entity::find_by_id(id)
                .one(db)
                .await?
                .ok_or_else(|| $kind.not_found())
        }

        pub async fn $get_fn(&self, id: i32) -> ResultEngine<$model> {
            self.$find_fn(&self.database, id).await
        }
    };
}

impl Engine {
    impl_catalog_reads!(
        people,
        find_person,
        person,
        people,
        Person,
        CatalogKind::Person
    );

    impl_catalog_reads!(
        planets,
        find_planet,
        planet,
        planets,
        Planet,
        CatalogKind::Planet
    );

    impl_catalog_reads!(
        vehicles,
        find_vehicle,
        vehicle,
        vehicles,
        Vehicle,
        CatalogKind::Vehicle
    );
}
