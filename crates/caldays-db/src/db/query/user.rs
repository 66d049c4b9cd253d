use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::db::{connection::DbConnection, schema::users};
use crate::model::user::{NewUser, User};

/// ## Summary
/// Returns a query to find a user by email.
#[must_use]
pub fn by_email(email: &str) -> users::BoxedQuery<'_, diesel::pg::Pg> {
    users::table.filter(users::email.eq(email)).into_boxed()
}

/// ## Errors
/// Returns a database error if the lookup fails.
pub async fn find_by_email(conn: &mut DbConnection<'_>, email: &str) -> QueryResult<Option<User>> {
    by_email(email)
        .select(User::as_select())
        .first::<User>(conn)
        .await
        .optional()
}

/// ## Errors
/// Returns a database error if the insert fails, e.g. on a duplicate email.
pub async fn insert(conn: &mut DbConnection<'_>, user: &NewUser<'_>) -> QueryResult<User> {
    diesel::insert_into(users::table)
        .values(user)
        .returning(User::as_returning())
        .get_result::<User>(conn)
        .await
}
