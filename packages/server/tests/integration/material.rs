use common::storage::Upload;
use common::{InterestArea, MaterialType, UserRole};
use mentoria_server::error::MaterialError;
use mentoria_server::models::material::MaterialDraft;

use crate::common::TestApp;

mod create {
    use super::*;

    #[tokio::test]
    async fn document_is_stored_and_persisted() {
        let app = TestApp::spawn().await;
        let mentor = app.create_user("ana", UserRole::Mentor, &[]).await;

        let draft = MaterialDraft::new("Ownership", MaterialType::Document)
            .with_areas([InterestArea::SoftwareDevelopment, InterestArea::Education]);
        let created = app
            .state
            .materials
            .create(draft, mentor, Some(Upload::from_bytes("ownership.pdf", b"%PDF".to_vec())))
            .await
            .unwrap();

        let path = created.stored_path.clone().unwrap();
        assert!(path.starts_with(&app.root));
        assert_eq!(std::fs::read(&path).unwrap(), b"%PDF");

        let loaded = app.state.materials.get(created.id).await.unwrap();
        assert_eq!(loaded.title, "Ownership");
        assert_eq!(loaded.stored_path, Some(path));
        assert_eq!(loaded.uploader_id, mentor);
        assert_eq!(
            loaded.interest_areas,
            vec![InterestArea::SoftwareDevelopment, InterestArea::Education]
        );
    }

    #[tokio::test]
    async fn link_ignores_attached_file() {
        let app = TestApp::spawn().await;
        let mentor = app.create_user("bia", UserRole::Mentor, &[]).await;

        let draft = MaterialDraft::new("Docs", MaterialType::Link).with_url("https://docs.rs");
        let created = app
            .state
            .materials
            .create(draft, mentor, Some(Upload::from_bytes("x.pdf", b"x".to_vec())))
            .await
            .unwrap();

        assert_eq!(created.stored_path, None);
        assert!(app.stored_files().is_empty());
    }

    #[tokio::test]
    async fn unknown_uploader_is_rejected() {
        let app = TestApp::spawn().await;
        let err = app
            .state
            .materials
            .create(
                MaterialDraft::new("Orphan", MaterialType::Document),
                12345,
                Some(Upload::from_bytes("orphan.pdf", b"x".to_vec())),
            )
            .await
            .unwrap_err();

        assert!(matches!(err, MaterialError::NotFound { entity: "User", .. }));
        assert!(app.stored_files().is_empty());
        assert!(app.state.materials.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn one_byte_over_limit_leaves_nothing_behind() {
        let app = TestApp::spawn_with(|config| config.upload.max_bytes = 16).await;
        let mentor = app.create_user("caio", UserRole::Mentor, &[]).await;

        let upload = Upload::new("big.txt", Box::new(std::io::Cursor::new(vec![b'a'; 17])));
        let err = app
            .state
            .materials
            .create(MaterialDraft::new("Big", MaterialType::Document), mentor, Some(upload))
            .await
            .unwrap_err();

        assert_eq!(err.code(), "PAYLOAD_TOO_LARGE");
        assert!(err.to_string().contains("16"));
        assert!(app.stored_files().is_empty());
        assert!(crate::common::files_in(&app.root.join(".tmp")).is_empty());
        assert!(app.state.materials.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn empty_upload_is_treated_as_absent() {
        let app = TestApp::spawn().await;
        let mentor = app.create_user("elis", UserRole::Mentor, &[]).await;

        let created = app
            .state
            .materials
            .create(
                MaterialDraft::new("Empty", MaterialType::Video),
                mentor,
                Some(Upload::from_bytes("c.mp4", Vec::new())),
            )
            .await
            .unwrap();

        assert_eq!(created.stored_path, None);
        assert_eq!(app.state.materials.get(created.id).await.unwrap().stored_path, None);
        assert!(app.stored_files().is_empty());
    }

    #[tokio::test]
    async fn concurrent_uploads_with_same_name_do_not_collide() {
        let app = TestApp::spawn().await;
        let mentor = app.create_user("duda", UserRole::Mentor, &[]).await;
        let draft = MaterialDraft::new("Same", MaterialType::Video);

        let (a, b) = tokio::join!(
            app.state.materials.create(
                draft.clone(),
                mentor,
                Some(Upload::from_bytes("clip.mp4", b"one".to_vec()))
            ),
            app.state.materials.create(
                draft,
                mentor,
                Some(Upload::from_bytes("clip.mp4", b"two".to_vec()))
            ),
        );

        let a = a.unwrap().stored_path.unwrap();
        let b = b.unwrap().stored_path.unwrap();
        assert_ne!(a, b);
        assert_eq!(app.stored_files().len(), 2);
    }
}

mod update {
    use super::*;

    #[tokio::test]
    async fn switching_to_link_removes_file_and_path() {
        let app = TestApp::spawn().await;
        let mentor = app.create_user("eva", UserRole::Mentor, &[]).await;
        let id = app.create_document(mentor, "Slides", "slides.pdf").await;

        let draft = MaterialDraft::new("Slides", MaterialType::Link).with_url("https://example.org/slides");
        let updated = app.state.materials.update(id, draft, None).await.unwrap();

        assert_eq!(updated.stored_path, None);
        assert!(app.stored_files().is_empty());
        assert_eq!(app.state.materials.get(id).await.unwrap().stored_path, None);
    }

    #[tokio::test]
    async fn new_file_replaces_old_one() {
        let app = TestApp::spawn().await;
        let mentor = app.create_user("fabio", UserRole::Mentor, &[]).await;
        let id = app.create_document(mentor, "Slides", "v1.pdf").await;

        let updated = app
            .state
            .materials
            .update(
                id,
                MaterialDraft::new("Slides v2", MaterialType::Document)
                    .with_areas([InterestArea::Education]),
                Some(Upload::from_bytes("v2.pdf", b"second".to_vec())),
            )
            .await
            .unwrap();

        let path = updated.stored_path.clone().unwrap();
        assert_eq!(app.stored_files(), vec![path.clone()]);
        assert_eq!(std::fs::read(path).unwrap(), b"second");

        let loaded = app.state.materials.get(id).await.unwrap();
        assert_eq!(loaded.title, "Slides v2");
        assert_eq!(loaded.interest_areas, vec![InterestArea::Education]);
        assert_eq!(loaded.uploader_id, mentor);
    }

    #[tokio::test]
    async fn empty_upload_keeps_existing_file() {
        let app = TestApp::spawn().await;
        let mentor = app.create_user("fred", UserRole::Mentor, &[]).await;
        let id = app.create_document(mentor, "Slides", "a.pdf").await;
        let before = app.stored_files();

        let updated = app
            .state
            .materials
            .update(
                id,
                MaterialDraft::new("Slides", MaterialType::Document),
                Some(Upload::new("b.pdf", Box::new(std::io::Cursor::new(Vec::new())))),
            )
            .await
            .unwrap();

        assert_eq!(updated.stored_path.as_ref(), before.first());
        assert_eq!(app.stored_files(), before);
        assert_eq!(std::fs::read(&before[0]).unwrap(), b"content");
    }

    #[tokio::test]
    async fn missing_material_is_not_found() {
        let app = TestApp::spawn().await;
        let err = app
            .state
            .materials
            .update(77, MaterialDraft::new("X", MaterialType::Link), None)
            .await
            .unwrap_err();
        assert!(matches!(err, MaterialError::NotFound { entity: "Material", id: 77 }));
    }
}

mod delete {
    use super::*;

    #[tokio::test]
    async fn removes_record_and_file() {
        let app = TestApp::spawn().await;
        let mentor = app.create_user("gil", UserRole::Mentor, &[]).await;
        let id = app.create_document(mentor, "Notes", "notes.txt").await;

        app.state.materials.delete(id).await.unwrap();

        assert!(app.stored_files().is_empty());
        assert_eq!(app.state.materials.get(id).await.unwrap_err().code(), "NOT_FOUND");
    }

    #[tokio::test]
    async fn succeeds_when_file_is_already_gone() {
        let app = TestApp::spawn().await;
        let mentor = app.create_user("hugo", UserRole::Mentor, &[]).await;
        let id = app.create_document(mentor, "Notes", "notes.txt").await;
        for file in app.stored_files() {
            std::fs::remove_file(file).unwrap();
        }

        app.state.materials.delete(id).await.unwrap();
        assert!(app.state.materials.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn record_with_path_outside_root_is_deleted_without_touching_it() {
        let app = TestApp::spawn().await;
        let mentor = app.create_user("iris", UserRole::Mentor, &[]).await;
        let id = app.create_document(mentor, "Notes", "notes.txt").await;

        // Point the record at a file outside the root behind the service's back.
        let outside = tempfile::NamedTempFile::new().unwrap();
        let mut material = app.state.materials.get(id).await.unwrap();
        material.stored_path = Some(outside.path().to_path_buf());
        {
            use mentoria_server::repository::{MaterialStore, SeaOrmMaterialStore};
            SeaOrmMaterialStore::new(app.state.db.clone())
                .update(material)
                .await
                .unwrap();
        }

        app.state.materials.delete(id).await.unwrap();
        assert!(outside.path().exists());
    }
}
