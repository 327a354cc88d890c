use diesel::prelude::*;

use crate::schema::{email_messages, roles, user_roles, users};

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct User {
    pub id: i32,
    pub username: String,
    pub email_address: Option<String>,
    pub unconfirmed_email_address: Option<String>,
    pub hashed_password: Option<String>,
    pub email_allowed: bool,
    pub api_key: Option<String>,
    pub created_date: String,
}

#[derive(Debug, Default, Clone, Insertable)]
#[diesel(table_name = users)]
pub struct NewUser {
    pub username: String,
    pub email_address: Option<String>,
    pub unconfirmed_email_address: Option<String>,
    pub hashed_password: Option<String>,
    pub email_allowed: bool,
    pub api_key: Option<String>,
    pub created_date: String,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = roles)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Role {
    pub id: i32,
    pub name: String,
}

#[derive(Debug, Default, Clone, Insertable)]
#[diesel(table_name = roles)]
pub struct NewRole {
    pub name: String,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = email_messages)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct EmailMessage {
    pub id: i32,
    pub to_user_id: i32,
    pub from_user_id: Option<i32>,
    pub subject: String,
    pub body: Option<String>,
    pub sent: bool,
}

#[derive(Debug, Default, Clone, Insertable)]
#[diesel(table_name = email_messages)]
pub struct NewEmailMessage {
    pub to_user_id: i32,
    pub from_user_id: Option<i32>,
    pub subject: String,
    pub body: Option<String>,
    pub sent: bool,
}

/// Join row tying a user to a role.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = user_roles)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct UserRole {
    pub user_id: i32,
    pub role_id: i32,
}
