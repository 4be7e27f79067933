//! User database entity for SeaORM.

use sea_orm::entity::prelude::*;
use sea_orm::Set;

use domain::{Address, Company, Geo, User};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    /// Index of the user in the stored collection
    #[sea_orm(primary_key, auto_increment = false)]
    pub position: i32,
    pub id: i64,
    pub name: String,
    pub username: String,
    pub email: String,
    pub phone: Option<String>,
    pub website: Option<String>,
    /// Whether the address record was present (its fields may still be NULL)
    pub has_address: bool,
    pub address_street: Option<String>,
    pub address_suite: Option<String>,
    pub address_city: Option<String>,
    pub address_zipcode: Option<String>,
    pub has_geo: bool,
    pub geo_lat: Option<String>,
    pub geo_lng: Option<String>,
    pub has_company: bool,
    pub company_name: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Convert database model to domain entity
impl From<Model> for User {
    fn from(model: Model) -> Self {
        let geo = model.has_geo.then(|| Geo {
            lat: model.geo_lat,
            lng: model.geo_lng,
        });

        let address = model.has_address.then(|| Address {
            street: model.address_street,
            suite: model.address_suite,
            city: model.address_city,
            zipcode: model.address_zipcode,
            geo,
        });

        let company = model.has_company.then(|| Company {
            name: model.company_name,
        });

        User {
            id: model.id,
            name: model.name,
            username: model.username,
            email: model.email,
            address,
            phone: model.phone,
            website: model.website,
            company,
        }
    }
}

impl ActiveModel {
    /// Build the row for `user` stored at `position` in the collection
    pub fn from_user(position: i32, user: &User) -> Self {
        let address = user.address.as_ref();
        let geo = address.and_then(|a| a.geo.as_ref());
        let company = user.company.as_ref();

        ActiveModel {
            position: Set(position),
            id: Set(user.id),
            name: Set(user.name.clone()),
            username: Set(user.username.clone()),
            email: Set(user.email.clone()),
            phone: Set(user.phone.clone()),
            website: Set(user.website.clone()),
            has_address: Set(address.is_some()),
            address_street: Set(address.and_then(|a| a.street.clone())),
            address_suite: Set(address.and_then(|a| a.suite.clone())),
            address_city: Set(address.and_then(|a| a.city.clone())),
            address_zipcode: Set(address.and_then(|a| a.zipcode.clone())),
            has_geo: Set(geo.is_some()),
            geo_lat: Set(geo.and_then(|g| g.lat.clone())),
            geo_lng: Set(geo.and_then(|g| g.lng.clone())),
            has_company: Set(company.is_some()),
            company_name: Set(company.and_then(|c| c.name.clone())),
        }
    }
}
