use corrlocate::{CorrLocateError, ImageView, OwnedImage};

#[test]
fn image_view_rejects_invalid_dimensions() {
    let data = [0u8; 4];

    let err = ImageView::from_slice(&data, 0, 1).err().unwrap();
    assert!(matches!(
        err,
        CorrLocateError::InvalidDimensions {
            width: 0,
            height: 1,
        }
    ));

    let err = ImageView::from_slice(&data, 1, 0).err().unwrap();
    assert!(matches!(
        err,
        CorrLocateError::InvalidDimensions {
            width: 1,
            height: 0,
        }
    ));
}

#[test]
fn image_view_rejects_invalid_stride() {
    let data = [0u8; 8];
    let err = ImageView::new(&data, 4, 1, 3).err().unwrap();
    assert!(matches!(
        err,
        CorrLocateError::InvalidStride {
            width: 4,
            stride: 3,
        }
    ));
}

#[test]
fn image_view_rejects_small_buffer() {
    let data = [0u8; 3];
    let err = ImageView::new(&data, 2, 2, 2).err().unwrap();
    assert!(matches!(
        err,
        CorrLocateError::BufferTooSmall { needed: 4, got: 3 }
    ));
}

#[test]
fn strided_view_reads_rows_without_padding() {
    let data = [1u8, 2, 3, 0, 4, 5, 6, 0];
    let view = ImageView::new(&data, 3, 2, 4).unwrap();
    assert_eq!(view.row(1).unwrap(), &[4u8, 5, 6]);
    assert_eq!(view.get(2, 0).copied(), Some(3));
    assert!(view.get(3, 0).is_none());
    assert!(view.row(2).is_none());
}

#[test]
fn owned_image_requires_exact_length() {
    assert!(OwnedImage::new(vec![0u8; 6], 3, 2).is_ok());

    let err = OwnedImage::new(vec![0u8; 5], 3, 2).err().unwrap();
    assert!(matches!(
        err,
        CorrLocateError::BufferTooSmall { needed: 6, got: 5 }
    ));

    let err = OwnedImage::new(vec![0u8; 7], 3, 2).err().unwrap();
    assert!(matches!(
        err,
        CorrLocateError::BufferLengthMismatch {
            expected: 6,
            got: 7
        }
    ));
}

#[test]
fn owned_image_view_round_trips() {
    let img = OwnedImage::new((0u8..6).collect(), 3, 2).unwrap();
    let view = img.view();
    assert_eq!((view.width(), view.height(), view.stride()), (3, 2, 3));
    assert_eq!(OwnedImage::from_view(view), img);
}
