//! The module contains the definition of a portal member.

use api_types::user::MemberView;
use axum::{Extension, Json};
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub username: String,
    pub password: String,
    pub display_name: Option<String>,
    pub is_admin: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// The authenticated member's own directory card.
pub async fn me(Extension(user): Extension<Model>) -> Json<MemberView> {
    Json(MemberView {
        username: user.username,
        display_name: user.display_name,
        is_admin: user.is_admin,
    })
}
