//! Entry points that read images from disk or from encoded bytes.
//!
//! Encoded bytes are first persisted through a [`TempStore`] and then read
//! back, so the stored copies remain available for inspection.

use crate::candidate::{Location, MatchRect};
use crate::image::io::load_gray_image;
use crate::image::OwnedImage;
use crate::kernel::Correlator;
use crate::search::Locator;
use crate::store::TempStore;
use crate::util::CorrLocateResult;
use std::path::Path;

fn load_pair(source: &Path, template: &Path) -> CorrLocateResult<(OwnedImage, OwnedImage)> {
    Ok((load_gray_image(source)?, load_gray_image(template)?))
}

fn store_pair(
    store: &TempStore,
    source: &[u8],
    template: &[u8],
) -> CorrLocateResult<(OwnedImage, OwnedImage)> {
    let source_path = store.put(source)?;
    let template_path = store.put(template)?;
    load_pair(&source_path, &template_path)
}

impl<C: Correlator> Locator<C> {
    /// [`Locator::locate`] over two image files.
    pub fn locate_files(
        &self,
        source: impl AsRef<Path>,
        template: impl AsRef<Path>,
    ) -> CorrLocateResult<Option<Location>> {
        let (src, tpl) = load_pair(source.as_ref(), template.as_ref())?;
        self.locate(src.view(), tpl.view())
    }

    /// [`Locator::locate_all`] over two image files.
    pub fn locate_all_files(
        &self,
        source: impl AsRef<Path>,
        template: impl AsRef<Path>,
    ) -> CorrLocateResult<Vec<Location>> {
        let (src, tpl) = load_pair(source.as_ref(), template.as_ref())?;
        self.locate_all(src.view(), tpl.view())
    }

    /// [`Locator::locate_rect`] over two image files.
    pub fn locate_rect_files(
        &self,
        source: impl AsRef<Path>,
        template: impl AsRef<Path>,
    ) -> CorrLocateResult<Option<MatchRect>> {
        let (src, tpl) = load_pair(source.as_ref(), template.as_ref())?;
        self.locate_rect(src.view(), tpl.view())
    }

    /// [`Locator::locate_all_rects`] over two image files.
    pub fn locate_all_rects_files(
        &self,
        source: impl AsRef<Path>,
        template: impl AsRef<Path>,
    ) -> CorrLocateResult<Vec<MatchRect>> {
        let (src, tpl) = load_pair(source.as_ref(), template.as_ref())?;
        self.locate_all_rects(src.view(), tpl.view())
    }

    /// [`Locator::locate`] over encoded images, persisted through `store`.
    pub fn locate_bytes(
        &self,
        store: &TempStore,
        source: &[u8],
        template: &[u8],
    ) -> CorrLocateResult<Option<Location>> {
        let (src, tpl) = store_pair(store, source, template)?;
        self.locate(src.view(), tpl.view())
    }

    /// [`Locator::locate_all`] over encoded images, persisted through `store`.
    pub fn locate_all_bytes(
        &self,
        store: &TempStore,
        source: &[u8],
        template: &[u8],
    ) -> CorrLocateResult<Vec<Location>> {
        let (src, tpl) = store_pair(store, source, template)?;
        self.locate_all(src.view(), tpl.view())
    }
}
