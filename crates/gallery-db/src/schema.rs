//! Table declarations for the gallery database.
//!
//! Every entity table carries a surrogate `id` primary key assigned by
//! SQLite on insert. Many-to-many relations are materialized as explicit
//! join tables with two-column composite keys.

diesel::table! {
    users (id) {
        id -> Integer,
        username -> Text,
        email_address -> Nullable<Text>,
        unconfirmed_email_address -> Nullable<Text>,
        hashed_password -> Nullable<Text>,
        email_allowed -> Bool,
        api_key -> Nullable<Text>,
        created_date -> Text,
    }
}

diesel::table! {
    roles (id) {
        id -> Integer,
        name -> Text,
    }
}

diesel::table! {
    email_messages (id) {
        id -> Integer,
        to_user_id -> Integer,
        from_user_id -> Nullable<Integer>,
        subject -> Text,
        body -> Nullable<Text>,
        sent -> Bool,
    }
}

diesel::table! {
    package_registrations (id) {
        id -> Integer,
        pkg_id -> Text,
        download_count -> BigInt,
    }
}

diesel::table! {
    packages (id) {
        id -> Integer,
        package_registration_id -> Integer,
        version -> Text,
        title -> Nullable<Text>,
        description -> Nullable<Text>,
        release_notes -> Nullable<Text>,
        copyright -> Nullable<Text>,
        created_date -> Text,
        published_date -> Nullable<Text>,
        listed -> Bool,
        is_latest -> Bool,
        is_latest_stable -> Bool,
        is_prerelease -> Bool,
        download_count -> BigInt,
        package_file_size -> BigInt,
        hash -> Text,
        hash_algorithm -> Text,
        requires_license_acceptance -> Bool,
        language -> Nullable<Text>,
        flattened_authors -> Nullable<Text>,
        tags -> Nullable<Jsonb>,
    }
}

diesel::table! {
    package_authors (id) {
        id -> Integer,
        package_id -> Integer,
        name -> Text,
    }
}

diesel::table! {
    package_statistics (id) {
        id -> Integer,
        package_id -> Integer,
        timestamp -> Text,
        ip_address -> Nullable<Text>,
        user_agent -> Nullable<Text>,
        operation -> Nullable<Text>,
    }
}

diesel::table! {
    package_dependencies (id) {
        id -> Integer,
        package_id -> Integer,
        dependency_id -> Text,
        version_spec -> Nullable<Text>,
        target_framework -> Nullable<Text>,
    }
}

diesel::table! {
    package_frameworks (id) {
        id -> Integer,
        package_id -> Integer,
        target_framework -> Text,
    }
}

diesel::table! {
    gallery_settings (id) {
        id -> Integer,
        name -> Text,
        value -> Nullable<Text>,
    }
}

diesel::table! {
    package_owner_requests (id) {
        id -> Integer,
        package_registration_id -> Integer,
        new_owner_id -> Integer,
        requesting_owner_id -> Integer,
        confirmation_code -> Text,
        request_date -> Text,
    }
}

diesel::table! {
    curated_feeds (id) {
        id -> Integer,
        name -> Text,
    }
}

diesel::table! {
    curated_packages (id) {
        id -> Integer,
        curated_feed_id -> Integer,
        package_registration_id -> Integer,
        automatically_curated -> Bool,
        included -> Bool,
        notes -> Nullable<Text>,
    }
}

diesel::table! {
    user_roles (user_id, role_id) {
        user_id -> Integer,
        role_id -> Integer,
    }
}

diesel::table! {
    package_registration_owners (package_registration_id, user_id) {
        package_registration_id -> Integer,
        user_id -> Integer,
    }
}

diesel::table! {
    curated_feed_managers (curated_feed_id, user_id) {
        curated_feed_id -> Integer,
        user_id -> Integer,
    }
}

// The recipient side only; the optional sender shares the target table and
// SQLite joins on it are written out explicitly where needed.
diesel::joinable!(email_messages -> users (to_user_id));

diesel::joinable!(packages -> package_registrations (package_registration_id));
diesel::joinable!(package_authors -> packages (package_id));
diesel::joinable!(package_statistics -> packages (package_id));
diesel::joinable!(package_dependencies -> packages (package_id));
diesel::joinable!(package_owner_requests -> package_registrations (package_registration_id));
diesel::joinable!(curated_packages -> curated_feeds (curated_feed_id));
diesel::joinable!(curated_packages -> package_registrations (package_registration_id));

diesel::joinable!(user_roles -> users (user_id));
diesel::joinable!(user_roles -> roles (role_id));
diesel::joinable!(package_registration_owners -> package_registrations (package_registration_id));
diesel::joinable!(package_registration_owners -> users (user_id));
diesel::joinable!(curated_feed_managers -> curated_feeds (curated_feed_id));
diesel::joinable!(curated_feed_managers -> users (user_id));

diesel::allow_tables_to_appear_in_same_query!(
    users,
    roles,
    email_messages,
    package_registrations,
    packages,
    package_authors,
    package_statistics,
    package_dependencies,
    package_frameworks,
    gallery_settings,
    package_owner_requests,
    curated_feeds,
    curated_packages,
    user_roles,
    package_registration_owners,
    curated_feed_managers,
);
