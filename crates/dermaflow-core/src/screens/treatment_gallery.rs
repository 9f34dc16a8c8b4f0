//! Treatment gallery: existing before/after pairs plus the upload form.
//!
//! The form is rejected before any upload call when either image or the
//! treatment date is missing. A before-image that uploaded successfully is
//! not rolled back when the after-image fails; the record is simply never
//! written.

use super::{apply_fetch, messages, FetchGuard, Navigation, ScreenState};
use crate::gateway::{Filter, Gateway, Query, StoreError};
use crate::media::MediaUpload;
use crate::records::{NewTreatmentPhoto, TreatmentPhoto};
use crate::session::SessionContext;
use chrono::NaiveDate;
use std::path::PathBuf;
use uuid::Uuid;

#[derive(Debug, Clone, Default)]
pub struct PhotoUploadForm {
    pub before_file: Option<PathBuf>,
    pub after_file: Option<PathBuf>,
    pub treatment_date: Option<NaiveDate>,
    pub notes: String,
    pub submitting: bool,
    pub error: Option<&'static str>,
}

pub struct TreatmentGalleryScreen {
    pub client_id: Uuid,
    pub state: ScreenState<Vec<TreatmentPhoto>>,
    pub form: PhotoUploadForm,
    guard: FetchGuard,
}

impl TreatmentGalleryScreen {
    pub fn new(client_id: Uuid) -> Self {
        Self {
            client_id,
            state: ScreenState::Loading,
            form: PhotoUploadForm::default(),
            guard: FetchGuard::default(),
        }
    }

    pub fn begin_load(&mut self) -> u64 {
        self.state = ScreenState::Loading;
        self.guard.begin()
    }

    pub fn fetch(gateway: &Gateway, client_id: Uuid) -> Result<Vec<TreatmentPhoto>, StoreError> {
        gateway.select(
            "treatment_photos",
            &Query::new()
                .filter(Filter::eq("client_id", client_id))
                .order_desc("treatment_date"),
        )
    }

    pub fn finish_load(
        &mut self,
        token: u64,
        ctx: &SessionContext,
        outcome: Result<Vec<TreatmentPhoto>, StoreError>,
    ) -> Navigation {
        apply_fetch(&mut self.state, &self.guard, token, ctx, outcome, Navigation::Stay)
    }

    pub fn load(&mut self, gateway: &Gateway, ctx: &SessionContext) -> Navigation {
        let token = self.begin_load();
        let outcome = Self::fetch(gateway, self.client_id);
        self.finish_load(token, ctx, outcome)
    }

    /// Upload both images and persist the pair. Incomplete input is rejected
    /// before any upload.
    pub fn submit(
        &mut self,
        gateway: &Gateway,
        ctx: &SessionContext,
        uploader: &dyn MediaUpload,
    ) -> Navigation {
        if self.form.submitting {
            return Navigation::Stay;
        }
        if ctx.revoked() {
            return Navigation::Login;
        }

        let (Some(before), Some(after), Some(date)) = (
            self.form.before_file.clone(),
            self.form.after_file.clone(),
            self.form.treatment_date,
        ) else {
            self.form.error = Some(messages::PHOTOS_INCOMPLETE);
            return Navigation::Stay;
        };

        self.form.submitting = true;
        self.form.error = None;

        let before_url = match uploader.upload(&before) {
            Ok(url) => url,
            Err(e) => {
                tracing::error!("before-image upload failed: {}", e);
                self.form.submitting = false;
                self.form.error = Some(messages::PHOTOS_SAVE_FAILED);
                return Navigation::Stay;
            }
        };
        let after_url = match uploader.upload(&after) {
            Ok(url) => url,
            Err(e) => {
                // The before-image stays on the media host; no rollback.
                tracing::error!("after-image upload failed: {}", e);
                self.form.submitting = false;
                self.form.error = Some(messages::PHOTOS_SAVE_FAILED);
                return Navigation::Stay;
            }
        };

        let payload = NewTreatmentPhoto {
            client_id: self.client_id,
            before_url,
            after_url,
            treatment_date: date,
            notes: if self.form.notes.trim().is_empty() {
                None
            } else {
                Some(self.form.notes.trim().to_string())
            },
        };

        match gateway.insert::<TreatmentPhoto, _>("treatment_photos", &payload) {
            Ok(photo) => {
                if let ScreenState::Ready(photos) = &mut self.state {
                    photos.insert(0, photo);
                }
                self.form = PhotoUploadForm::default();
                Navigation::Stay
            }
            Err(e) => {
                tracing::error!("saving treatment photos failed: {}", e);
                self.form.submitting = false;
                self.form.error = Some(messages::PHOTOS_SAVE_FAILED);
                Navigation::Stay
            }
        }
    }
}
