#[cfg(test)]
mod tests {
    use crate::database::entity::{post, user};
    use crate::database::postgres_repo::{
        PostgresFollowRepository, PostgresPostRepository, PostgresUserRepository,
    };
    use murmur_core::domain::Post;
    use murmur_core::ports::{BaseRepository, FollowRepository, UserRepository};
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    #[tokio::test]
    async fn test_find_post_by_id() {
        let post_id = uuid::Uuid::new_v4();
        let author_id = uuid::Uuid::new_v4();
        let now = chrono::Utc::now();

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![post::Model {
                id: post_id,
                author_id,
                text: "Test post".to_owned(),
                pub_date: now.into(),
                group_id: None,
                image: None,
            }]])
            .into_connection();

        let repo = PostgresPostRepository::new(db);

        let result: Option<Post> = repo.find_by_id(post_id).await.unwrap();

        assert!(result.is_some());
        let post = result.unwrap();
        assert_eq!(post.text, "Test post");
        assert_eq!(post.id, post_id);
    }

    #[tokio::test]
    async fn test_save_issues_an_insert_for_client_generated_ids() {
        let post_id = uuid::Uuid::new_v4();
        let author_id = uuid::Uuid::new_v4();
        let now = chrono::Utc::now();

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![post::Model {
                id: post_id,
                author_id,
                text: "Fresh post".to_owned(),
                pub_date: now.into(),
                group_id: None,
                image: None,
            }]])
            .into_connection();

        let repo = PostgresPostRepository::new(db);

        let saved = repo
            .save(Post {
                id: post_id,
                author_id,
                text: "Fresh post".to_owned(),
                pub_date: now,
                group_id: None,
                image: None,
            })
            .await
            .unwrap();
        assert_eq!(saved.id, post_id);

        // A fresh row must INSERT (with an upsert clause), never
        // UPDATE: the primary key is set before the row ever exists.
        let log = format!("{:?}", repo.db.into_transaction_log());
        assert!(log.contains(r#"INSERT INTO "posts""#));
        assert!(log.contains("ON CONFLICT"));
        assert!(!log.contains(r#"UPDATE "posts""#));
    }

    #[tokio::test]
    async fn test_find_user_by_username() {
        let user_id = uuid::Uuid::new_v4();
        let now = chrono::Utc::now();

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![user::Model {
                id: user_id,
                username: "alice".to_owned(),
                password_hash: "hash".to_owned(),
                created_at: now.into(),
            }]])
            .into_connection();

        let repo = PostgresUserRepository::new(db);

        let found = repo.find_by_username("alice").await.unwrap().unwrap();
        assert_eq!(found.id, user_id);
        assert_eq!(found.username, "alice");
    }

    #[tokio::test]
    async fn test_delete_pair_reports_whether_a_row_existed() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results(vec![
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                },
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 0,
                },
            ])
            .into_connection();

        let repo = PostgresFollowRepository::new(db);

        let user_id = uuid::Uuid::new_v4();
        let author_id = uuid::Uuid::new_v4();
        assert!(repo.delete_pair(user_id, author_id).await.unwrap());
        assert!(!repo.delete_pair(user_id, author_id).await.unwrap());
    }
}
