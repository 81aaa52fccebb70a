//! Trip form submit flow
//!
//! Two-phase commit, informally: if the user attached a new cover image this
//! session, upload it first and merge the returned URL into the record, then
//! persist the record through the trip API. The two writes are sequential
//! and not transactional; if persist fails after a successful upload, the
//! stored object stays behind (no compensating delete) and a retry re-runs
//! persist only, because the form already holds the uploaded URL.
//!
//! States: `Idle → Validating → (Uploading)? → Persisting → Done | Failed`.

use anyhow::Result;
use async_trait::async_trait;
use tripdesk_core::Trip;

use crate::uploader::UploadClient;

/// A file picked for upload in this form session.
#[derive(Debug, Clone)]
pub struct FileSelection {
    pub filename: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

/// Whether submission creates a new trip or replaces an existing one.
/// Fixed at flow start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitMode {
    Create,
    Update,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitState {
    Idle,
    Validating,
    Uploading,
    Persisting,
    Done,
    Failed,
}

/// The record being edited plus any newly selected file.
#[derive(Debug, Clone)]
pub struct TripForm {
    pub trip: Trip,
    pub selected_file: Option<FileSelection>,
}

impl TripForm {
    pub fn new(trip: Trip) -> Self {
        Self {
            trip,
            selected_file: None,
        }
    }

    pub fn attach_file(&mut self, file: FileSelection) {
        self.selected_file = Some(file);
    }

    /// Local required-field validation; mirrors the server's check so a bad
    /// form never issues a network call.
    pub fn validate(&self) -> Result<()> {
        let missing: Vec<&str> = [
            ("code", self.trip.code.is_empty()),
            ("name", self.trip.name.is_empty()),
            ("length", self.trip.length.is_empty()),
            ("resort", self.trip.resort.is_empty()),
            ("perPerson", self.trip.per_person.is_empty()),
            ("description", self.trip.description.is_empty()),
        ]
        .iter()
        .filter(|(_, empty)| *empty)
        .map(|(field, _)| *field)
        .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(anyhow::anyhow!(
                "Missing required fields: {}",
                missing.join(", ")
            ))
        }
    }
}

/// Trip persistence seam; implemented by `ApiClient` and by test fakes.
#[async_trait]
pub trait TripClient: Send + Sync {
    async fn create_trip(&self, trip: &Trip) -> Result<Trip>;
    async fn replace_trip(&self, code: &str, trip: &Trip) -> Result<Trip>;
}

/// Per-submission state machine.
pub struct SubmitFlow {
    mode: SubmitMode,
    state: SubmitState,
}

impl SubmitFlow {
    pub fn new(mode: SubmitMode) -> Self {
        Self {
            mode,
            state: SubmitState::Idle,
        }
    }

    pub fn state(&self) -> SubmitState {
        self.state
    }

    /// Run one submission. Safe to call again after a failure: a retry
    /// re-runs only the phases that have not completed (an already-uploaded
    /// image is not uploaded again).
    pub async fn submit(
        &mut self,
        form: &mut TripForm,
        uploads: &dyn UploadClient,
        trips: &dyn TripClient,
        on_progress: &mut (dyn FnMut(u8) + Send),
    ) -> Result<Trip> {
        self.state = SubmitState::Validating;
        if let Err(err) = form.validate() {
            self.state = SubmitState::Failed;
            return Err(err);
        }

        if let Some(file) = form.selected_file.take() {
            self.state = SubmitState::Uploading;
            match uploads.upload_file(&file, on_progress).await {
                Ok(uploaded) => {
                    tracing::debug!(image_url = %uploaded.image_url, "Image uploaded, merging into record");
                    form.trip.image = uploaded.image_url;
                    // selected_file stays cleared: a persist retry must not
                    // re-upload.
                }
                Err(err) => {
                    // Put the file back so the user can retry the whole flow.
                    form.selected_file = Some(file);
                    self.state = SubmitState::Failed;
                    return Err(err);
                }
            }
        }

        self.state = SubmitState::Persisting;
        let result = match self.mode {
            SubmitMode::Create => trips.create_trip(&form.trip).await,
            SubmitMode::Update => trips.replace_trip(&form.trip.code, &form.trip).await,
        };

        match result {
            Ok(trip) => {
                self.state = SubmitState::Done;
                Ok(trip)
            }
            Err(err) => {
                // The uploaded object (if any) is now orphaned; that is the
                // documented outcome, not something to roll back here.
                self.state = SubmitState::Failed;
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::Mutex;
    use tripdesk_core::UploadedImage;

    fn sample_trip(code: &str) -> Trip {
        Trip {
            code: code.to_string(),
            name: "Gale Reef".to_string(),
            length: "4 nights / 5 days".to_string(),
            start: Utc.with_ymd_and_hms(2026, 2, 14, 8, 0, 0).unwrap(),
            resort: "Emerald Bay".to_string(),
            per_person: "799.00".to_string(),
            image: "https://bucket.s3.amazonaws.com/old-key-cover.png".to_string(),
            description: "Reef trip".to_string(),
        }
    }

    fn png_selection() -> FileSelection {
        FileSelection {
            filename: "cover.png".to_string(),
            content_type: "image/png".to_string(),
            data: vec![0u8; 128],
        }
    }

    struct FakeUploader {
        calls: AtomicUsize,
        fail: AtomicBool,
        url: String,
        progress_script: Vec<u8>,
    }

    impl FakeUploader {
        fn new(url: &str) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                fail: AtomicBool::new(false),
                url: url.to_string(),
                progress_script: vec![0, 37, 80, 100],
            }
        }
    }

    #[async_trait]
    impl UploadClient for FakeUploader {
        async fn upload_file(
            &self,
            _file: &FileSelection,
            on_progress: &mut (dyn FnMut(u8) + Send),
        ) -> Result<UploadedImage> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail.load(Ordering::SeqCst) {
                return Err(anyhow::anyhow!("Upload failed with status 500"));
            }
            for pct in &self.progress_script {
                on_progress(*pct);
            }
            Ok(UploadedImage {
                image_url: self.url.clone(),
            })
        }
    }

    struct FakeTripClient {
        persisted: Mutex<Vec<Trip>>,
        fail_persist: AtomicBool,
    }

    impl FakeTripClient {
        fn new() -> Self {
            Self {
                persisted: Mutex::new(Vec::new()),
                fail_persist: AtomicBool::new(false),
            }
        }

        fn persist_count(&self) -> usize {
            self.persisted.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl TripClient for FakeTripClient {
        async fn create_trip(&self, trip: &Trip) -> Result<Trip> {
            if self.fail_persist.load(Ordering::SeqCst) {
                return Err(anyhow::anyhow!("API request failed with status 500"));
            }
            self.persisted.lock().unwrap().push(trip.clone());
            Ok(trip.clone())
        }

        async fn replace_trip(&self, _code: &str, trip: &Trip) -> Result<Trip> {
            self.create_trip(trip).await
        }
    }

    #[tokio::test]
    async fn no_file_selected_skips_upload_entirely() {
        let uploader = FakeUploader::new("https://bucket.s3.amazonaws.com/new-key-cover.png");
        let trips = FakeTripClient::new();
        let mut form = TripForm::new(sample_trip("GALR210214"));
        let mut flow = SubmitFlow::new(SubmitMode::Update);

        let result = flow
            .submit(&mut form, &uploader, &trips, &mut |_| {})
            .await
            .unwrap();

        assert_eq!(uploader.calls.load(Ordering::SeqCst), 0);
        assert_eq!(flow.state(), SubmitState::Done);
        // Existing URL retained untouched.
        assert_eq!(result.image, "https://bucket.s3.amazonaws.com/old-key-cover.png");
    }

    #[tokio::test]
    async fn selected_file_is_uploaded_and_url_merged_before_persist() {
        let uploader = FakeUploader::new("https://bucket.s3.amazonaws.com/new-key-cover.png");
        let trips = FakeTripClient::new();
        let mut form = TripForm::new(sample_trip("GALR210214"));
        form.attach_file(png_selection());
        let mut flow = SubmitFlow::new(SubmitMode::Create);

        flow.submit(&mut form, &uploader, &trips, &mut |_| {})
            .await
            .unwrap();

        assert_eq!(uploader.calls.load(Ordering::SeqCst), 1);
        // The record the trip API saw already carried the new URL.
        let persisted = trips.persisted.lock().unwrap();
        assert_eq!(
            persisted[0].image,
            "https://bucket.s3.amazonaws.com/new-key-cover.png"
        );
        assert!(form.selected_file.is_none());
    }

    #[tokio::test]
    async fn upload_failure_blocks_persist() {
        let uploader = FakeUploader::new("https://bucket.s3.amazonaws.com/new-key-cover.png");
        uploader.fail.store(true, Ordering::SeqCst);
        let trips = FakeTripClient::new();
        let mut form = TripForm::new(sample_trip("GALR210214"));
        form.attach_file(png_selection());
        let mut flow = SubmitFlow::new(SubmitMode::Create);

        let err = flow
            .submit(&mut form, &uploader, &trips, &mut |_| {})
            .await
            .unwrap_err();

        assert!(err.to_string().contains("Upload failed"));
        assert_eq!(flow.state(), SubmitState::Failed);
        assert_eq!(trips.persist_count(), 0);
        // Old URL untouched, file still attached for a full retry.
        assert_eq!(form.trip.image, "https://bucket.s3.amazonaws.com/old-key-cover.png");
        assert!(form.selected_file.is_some());
    }

    #[tokio::test]
    async fn persist_failure_after_upload_retries_without_reupload() {
        let uploader = FakeUploader::new("https://bucket.s3.amazonaws.com/new-key-cover.png");
        let trips = FakeTripClient::new();
        trips.fail_persist.store(true, Ordering::SeqCst);
        let mut form = TripForm::new(sample_trip("GALR210214"));
        form.attach_file(png_selection());
        let mut flow = SubmitFlow::new(SubmitMode::Update);

        let err = flow
            .submit(&mut form, &uploader, &trips, &mut |_| {})
            .await
            .unwrap_err();
        assert!(err.to_string().contains("status 500"));
        assert_eq!(flow.state(), SubmitState::Failed);

        // The upload already happened; its URL lives in the form even though
        // nothing was persisted. The stored object is orphaned until a
        // persist succeeds, by design.
        assert_eq!(
            form.trip.image,
            "https://bucket.s3.amazonaws.com/new-key-cover.png"
        );
        assert_eq!(trips.persist_count(), 0);

        // Retry: persist only, no second upload.
        trips.fail_persist.store(false, Ordering::SeqCst);
        flow.submit(&mut form, &uploader, &trips, &mut |_| {})
            .await
            .unwrap();

        assert_eq!(uploader.calls.load(Ordering::SeqCst), 1);
        assert_eq!(trips.persist_count(), 1);
        assert_eq!(flow.state(), SubmitState::Done);
    }

    #[tokio::test]
    async fn invalid_form_makes_no_network_calls() {
        let uploader = FakeUploader::new("https://bucket.s3.amazonaws.com/new-key-cover.png");
        let trips = FakeTripClient::new();
        let mut trip = sample_trip("GALR210214");
        trip.name = String::new();
        let mut form = TripForm::new(trip);
        form.attach_file(png_selection());
        let mut flow = SubmitFlow::new(SubmitMode::Create);

        let err = flow
            .submit(&mut form, &uploader, &trips, &mut |_| {})
            .await
            .unwrap_err();

        assert!(err.to_string().contains("name"));
        assert_eq!(flow.state(), SubmitState::Failed);
        assert_eq!(uploader.calls.load(Ordering::SeqCst), 0);
        assert_eq!(trips.persist_count(), 0);
    }

    #[tokio::test]
    async fn progress_reaches_the_caller_in_order() {
        let uploader = FakeUploader::new("https://bucket.s3.amazonaws.com/new-key-cover.png");
        let trips = FakeTripClient::new();
        let mut form = TripForm::new(sample_trip("GALR210214"));
        form.attach_file(png_selection());
        let mut flow = SubmitFlow::new(SubmitMode::Create);

        let mut seen: Vec<u8> = Vec::new();
        flow.submit(&mut form, &uploader, &trips, &mut |pct| seen.push(pct))
            .await
            .unwrap();

        assert_eq!(seen, vec![0, 37, 80, 100]);
        assert!(seen.windows(2).all(|w| w[0] <= w[1]));
    }
}
