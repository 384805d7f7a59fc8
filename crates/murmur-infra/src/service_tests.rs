//! Service-level tests run against the in-memory store and a manual
//! clock, so ordering and expiry are fully deterministic.

use std::sync::Arc;

use chrono::{Duration, Utc};

use murmur_core::DomainError;
use murmur_core::domain::{Group, Post, User};
use murmur_core::ports::{BaseRepository, Clock, FollowRepository};
use murmur_core::services::{FollowService, NewPost, PostEdit, PostService};

use crate::clock::ManualClock;
use crate::database::InMemoryStore;

struct TestEnv {
    store: Arc<InMemoryStore>,
    clock: Arc<ManualClock>,
    posts: PostService,
    follows: FollowService,
}

fn env() -> TestEnv {
    let store = Arc::new(InMemoryStore::new());
    let clock = Arc::new(ManualClock::new(Utc::now()));

    let posts = PostService::new(
        store.clone(),
        store.clone(),
        store.clone(),
        store.clone(),
        clock.clone(),
    );
    let follows = FollowService::new(store.clone(), store.clone(), store.clone());

    TestEnv {
        store,
        clock,
        posts,
        follows,
    }
}

async fn make_user(env: &TestEnv, name: &str) -> User {
    env.store
        .save(User::new(name.into(), "hash".into(), env.clock.now()))
        .await
        .unwrap()
}

async fn make_group(env: &TestEnv, slug: &str) -> Group {
    env.store
        .save(Group::new(
            format!("Group {slug}"),
            slug.into(),
            "a test group".into(),
        ))
        .await
        .unwrap()
}

fn plain_post(text: &str) -> NewPost {
    NewPost {
        text: text.into(),
        group_slug: None,
        image: None,
    }
}

#[tokio::test]
async fn test_posts_are_listed_newest_first() {
    let env = env();
    let alice = make_user(&env, "alice").await;

    for text in ["first", "second", "third"] {
        env.posts
            .create_post(alice.id, plain_post(text))
            .await
            .unwrap();
        env.clock.advance(Duration::seconds(1));
    }

    let listed = env.posts.list_posts().await.unwrap();
    let texts: Vec<&str> = listed.iter().map(|p| p.text.as_str()).collect();
    assert_eq!(texts, vec!["third", "second", "first"]);

    for pair in listed.windows(2) {
        assert!(pair[0].pub_date > pair[1].pub_date);
    }
}

#[tokio::test]
async fn test_create_post_rejects_blank_text() {
    let env = env();
    let alice = make_user(&env, "alice").await;

    let result = env.posts.create_post(alice.id, plain_post("   ")).await;
    assert!(matches!(result, Err(DomainError::Validation(_))));
    assert!(env.posts.list_posts().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_create_post_stamps_clock_time() {
    let env = env();
    let alice = make_user(&env, "alice").await;

    let before = env.clock.now();
    let post = env
        .posts
        .create_post(alice.id, plain_post("hello"))
        .await
        .unwrap();

    assert_eq!(post.pub_date, before);
    assert_eq!(post.author_id, alice.id);
}

#[tokio::test]
async fn test_create_post_with_unknown_group_slug() {
    let env = env();
    let alice = make_user(&env, "alice").await;

    let result = env
        .posts
        .create_post(
            alice.id,
            NewPost {
                text: "hello".into(),
                group_slug: Some("missing".into()),
                image: None,
            },
        )
        .await;

    assert!(matches!(result, Err(DomainError::NotFound { .. })));
}

#[tokio::test]
async fn test_edit_by_non_author_is_forbidden_and_leaves_post_unchanged() {
    let env = env();
    let alice = make_user(&env, "alice").await;
    let mallory = make_user(&env, "mallory").await;

    let post = env
        .posts
        .create_post(alice.id, plain_post("original"))
        .await
        .unwrap();

    let result = env
        .posts
        .edit_post(
            mallory.id,
            post.id,
            PostEdit {
                text: "hijacked".into(),
                group_slug: None,
            },
        )
        .await;
    assert!(matches!(result, Err(DomainError::Forbidden)));

    let (unchanged, _) = env.posts.post_detail(post.id).await.unwrap();
    assert_eq!(unchanged.text, "original");
}

#[tokio::test]
async fn test_edit_keeps_pub_date_and_author() {
    let env = env();
    let alice = make_user(&env, "alice").await;
    make_group(&env, "cats").await;

    let post = env
        .posts
        .create_post(alice.id, plain_post("original"))
        .await
        .unwrap();

    env.clock.advance(Duration::seconds(60));
    let edited = env
        .posts
        .edit_post(
            alice.id,
            post.id,
            PostEdit {
                text: "revised".into(),
                group_slug: Some("cats".into()),
            },
        )
        .await
        .unwrap();

    assert_eq!(edited.text, "revised");
    assert_eq!(edited.pub_date, post.pub_date);
    assert_eq!(edited.author_id, alice.id);
    assert!(edited.group_id.is_some());
}

#[tokio::test]
async fn test_edit_unknown_post_is_not_found() {
    let env = env();
    let alice = make_user(&env, "alice").await;

    let result = env
        .posts
        .edit_post(
            alice.id,
            uuid::Uuid::new_v4(),
            PostEdit {
                text: "whatever".into(),
                group_slug: None,
            },
        )
        .await;

    assert!(matches!(result, Err(DomainError::NotFound { .. })));
}

#[tokio::test]
async fn test_comment_validation_and_linking() {
    let env = env();
    let alice = make_user(&env, "alice").await;
    let bob = make_user(&env, "bob").await;

    let post = env
        .posts
        .create_post(alice.id, plain_post("hello"))
        .await
        .unwrap();

    let blank = env.posts.add_comment(bob.id, post.id, "  ").await;
    assert!(matches!(blank, Err(DomainError::Validation(_))));

    let missing = env
        .posts
        .add_comment(bob.id, uuid::Uuid::new_v4(), "hi")
        .await;
    assert!(matches!(missing, Err(DomainError::NotFound { .. })));

    env.posts.add_comment(bob.id, post.id, "hi").await.unwrap();
    let (_, comments) = env.posts.post_detail(post.id).await.unwrap();
    assert_eq!(comments.len(), 1);
    assert_eq!(comments[0].author_id, bob.id);
}

#[tokio::test]
async fn test_group_filter_returns_only_that_groups_posts() {
    let env = env();
    let alice = make_user(&env, "alice").await;
    make_group(&env, "s").await;
    make_group(&env, "other").await;

    env.posts
        .create_post(
            alice.id,
            NewPost {
                text: "hello".into(),
                group_slug: Some("s".into()),
                image: None,
            },
        )
        .await
        .unwrap();

    let (_, in_s) = env.posts.group_posts("s").await.unwrap();
    assert_eq!(in_s.len(), 1);
    assert_eq!(in_s[0].text, "hello");

    let (_, in_other) = env.posts.group_posts("other").await.unwrap();
    assert!(in_other.is_empty());

    let unknown = env.posts.group_posts("nope").await;
    assert!(matches!(unknown, Err(DomainError::NotFound { .. })));
}

#[tokio::test]
async fn test_feed_follows_the_follow_relation() {
    let env = env();
    let viewer = make_user(&env, "viewer").await;
    let author = make_user(&env, "author").await;
    let stranger = make_user(&env, "stranger").await;

    env.posts
        .create_post(author.id, plain_post("by author"))
        .await
        .unwrap();
    env.posts
        .create_post(stranger.id, plain_post("by stranger"))
        .await
        .unwrap();

    // Nothing before following.
    assert!(env.follows.feed(viewer.id).await.unwrap().is_empty());

    env.follows.follow(viewer.id, "author").await.unwrap();
    let feed = env.follows.feed(viewer.id).await.unwrap();
    assert_eq!(feed.len(), 1);
    assert_eq!(feed[0].text, "by author");

    env.follows.unfollow(viewer.id, "author").await.unwrap();
    assert!(env.follows.feed(viewer.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_feed_is_empty_after_authors_posts_are_deleted() {
    let env = env();
    let viewer = make_user(&env, "viewer").await;
    let author = make_user(&env, "author").await;

    let post = env
        .posts
        .create_post(author.id, plain_post("going away"))
        .await
        .unwrap();
    env.follows.follow(viewer.id, "author").await.unwrap();

    BaseRepository::<Post, uuid::Uuid>::delete(&*env.store, post.id)
        .await
        .unwrap();

    assert!(env.follows.feed(viewer.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_self_follow_is_rejected() {
    let env = env();
    let alice = make_user(&env, "alice").await;

    let result = env.follows.follow(alice.id, "alice").await;
    assert!(matches!(result, Err(DomainError::Validation(_))));
}

#[tokio::test]
async fn test_duplicate_follow_is_a_noop() {
    let env = env();
    let viewer = make_user(&env, "viewer").await;
    let author = make_user(&env, "author").await;

    env.follows.follow(viewer.id, "author").await.unwrap();
    env.follows.follow(viewer.id, "author").await.unwrap();

    let followed = env.store.authors_followed_by(viewer.id).await.unwrap();
    assert_eq!(followed, vec![author.id]);
}

#[tokio::test]
async fn test_unfollow_of_absent_relation_is_a_noop() {
    let env = env();
    let viewer = make_user(&env, "viewer").await;
    make_user(&env, "author").await;

    env.follows.unfollow(viewer.id, "author").await.unwrap();
}

#[tokio::test]
async fn test_follow_unknown_username_is_not_found() {
    let env = env();
    let viewer = make_user(&env, "viewer").await;

    let result = env.follows.follow(viewer.id, "ghost").await;
    assert!(matches!(result, Err(DomainError::NotFound { .. })));
}

#[tokio::test]
async fn test_author_posts_and_is_following() {
    let env = env();
    let viewer = make_user(&env, "viewer").await;
    let author = make_user(&env, "author").await;

    env.posts
        .create_post(author.id, plain_post("mine"))
        .await
        .unwrap();

    let (profile, posts) = env.posts.author_posts("author").await.unwrap();
    assert_eq!(profile.id, author.id);
    assert_eq!(posts.len(), 1);

    assert!(!env
        .follows
        .is_following(viewer.id, author.id)
        .await
        .unwrap());
    env.follows.follow(viewer.id, "author").await.unwrap();
    assert!(env
        .follows
        .is_following(viewer.id, author.id)
        .await
        .unwrap());
}
