use recipe_lookup::{FileStorage, LikedRecipe, Likes, LikesStorage, RecipeError};
use std::fs;

const KEY: &str = "recipe-lookup.likes";

fn liked(id: &str, title: &str) -> LikedRecipe {
    LikedRecipe {
        id: id.to_string(),
        title: title.to_string(),
        author: "The Pioneer Woman".to_string(),
        img: format!("http://img/{id}.jpg"),
    }
}

#[test]
fn test_missing_file_reads_none() {
    let dir = tempfile::tempdir().unwrap();
    let storage = FileStorage::new(dir.path());
    assert_eq!(storage.read_all(KEY).unwrap(), None);
}

#[test]
fn test_write_creates_directory() {
    let dir = tempfile::tempdir().unwrap();
    let nested = dir.path().join("nested").join("state");
    let storage = FileStorage::new(&nested);

    storage.write_all(KEY, &[liked("r1", "Pasta")]).unwrap();
    assert!(storage.path_for(KEY).exists());
    assert_eq!(
        storage.read_all(KEY).unwrap(),
        Some(vec![liked("r1", "Pasta")])
    );
}

#[test]
fn test_likes_round_trip_through_files() {
    let dir = tempfile::tempdir().unwrap();
    let storage = FileStorage::new(dir.path());

    let mut likes = Likes::new();
    likes.add_like("r1", "Pasta", "Cook", "img1").unwrap();
    likes.add_like("r2", "Soup", "Cook", "img2").unwrap();
    likes.persist(&storage, KEY).unwrap();

    let restored = Likes::restore(&storage, KEY);
    let ids: Vec<&str> = restored.iter().map(|l| l.id.as_str()).collect();
    assert_eq!(ids, vec!["r1", "r2"]);
    assert!(restored.is_liked("r2"));
}

#[test]
fn test_corrupt_file() {
    let dir = tempfile::tempdir().unwrap();
    let storage = FileStorage::new(dir.path());
    fs::write(storage.path_for(KEY), "{\"likes\": oops").unwrap();

    assert!(matches!(storage.read_all(KEY), Err(RecipeError::Storage(_))));
    assert_eq!(Likes::restore(&storage, KEY).count(), 0);
}

#[test]
fn test_empty_file_is_no_data() {
    let dir = tempfile::tempdir().unwrap();
    let storage = FileStorage::new(dir.path());
    fs::write(storage.path_for(KEY), "  \n").unwrap();

    assert_eq!(storage.read_all(KEY).unwrap(), None);
}

#[test]
fn test_rewrite_replaces_file_without_leftovers() {
    let dir = tempfile::tempdir().unwrap();
    let storage = FileStorage::new(dir.path());

    storage.write_all(KEY, &[liked("r1", "Pasta")]).unwrap();
    storage
        .write_all(KEY, &[liked("r2", "Tacos"), liked("r3", "Curry")])
        .unwrap();

    let entries: Vec<_> = fs::read_dir(dir.path())
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .collect();
    assert_eq!(entries, vec![storage.path_for(KEY)]);
    assert_eq!(
        storage.read_all(KEY).unwrap(),
        Some(vec![liked("r2", "Tacos"), liked("r3", "Curry")])
    );
}
