use std::collections::HashMap;

use axum::extract::Multipart;
use vidtube_core::MediaFile;

use super::error::ApiError;

/// A fully buffered multipart body: text fields and file parts by field name.
#[derive(Debug, Default)]
pub struct MultipartForm {
    fields: HashMap<String, String>,
    files: HashMap<String, MediaFile>,
}

impl MultipartForm {
    pub async fn read(mut multipart: Multipart) -> Result<Self, ApiError> {
        let mut form = Self::default();

        while let Some(field) = multipart.next_field().await? {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };

            match field.file_name().map(str::to_string) {
                Some(file_name) => {
                    let content_type = field.content_type().map(str::to_string);
                    let data = field.bytes().await?;
                    form.files
                        .insert(name, MediaFile::new(file_name, content_type, data.to_vec()));
                }
                None => {
                    let value = field.text().await?;
                    form.fields.insert(name, value);
                }
            }
        }

        Ok(form)
    }

    /// First present field among `names`.
    pub fn take_field(&mut self, names: &[&str]) -> Option<String> {
        names.iter().find_map(|name| self.fields.remove(*name))
    }

    pub fn take_file(&mut self, name: &str) -> Option<MediaFile> {
        self.files.remove(name)
    }
}
