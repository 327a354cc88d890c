//! User account queries.

use diesel::prelude::*;

use crate::{
    models::{EmailMessage, Role, User},
    schema::{email_messages, roles, user_roles, users},
};

/// Repository for user account operations.
pub struct UsersRepository;

impl UsersRepository {
    /// Lists all users.
    pub fn list_all(conn: &mut SqliteConnection) -> QueryResult<Vec<User>> {
        users::table.select(User::as_select()).load(conn)
    }

    /// Finds a user by surrogate key.
    pub fn find_by_key(conn: &mut SqliteConnection, key: i32) -> QueryResult<Option<User>> {
        users::table
            .find(key)
            .select(User::as_select())
            .first(conn)
            .optional()
    }

    /// Finds a user by username.
    pub fn find_by_username(
        conn: &mut SqliteConnection,
        username: &str,
    ) -> QueryResult<Option<User>> {
        users::table
            .filter(users::username.eq(username))
            .select(User::as_select())
            .first(conn)
            .optional()
    }

    /// Roles granted to a user, through the join table.
    pub fn roles_of(conn: &mut SqliteConnection, user_key: i32) -> QueryResult<Vec<Role>> {
        user_roles::table
            .inner_join(roles::table)
            .filter(user_roles::user_id.eq(user_key))
            .select(Role::as_select())
            .load(conn)
    }

    /// Messages addressed to a user.
    pub fn messages_for(
        conn: &mut SqliteConnection,
        user_key: i32,
    ) -> QueryResult<Vec<EmailMessage>> {
        email_messages::table
            .filter(email_messages::to_user_id.eq(user_key))
            .select(EmailMessage::as_select())
            .load(conn)
    }
}
