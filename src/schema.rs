diesel::table! {
    notes (id) {
        id -> Integer,
        title -> Text,
        description -> Text,
        category -> Text,
        created_at -> Timestamp,
        updated_at -> Timestamp,
    }
}
