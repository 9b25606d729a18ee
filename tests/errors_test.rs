#[cfg(test)]
mod error_tests {
    use avatarfit::errors::AvatarError;
    use std::error::Error;

    #[test]
    fn test_invalid_crop_display() {
        let error = AvatarError::InvalidCrop { width: 0, height: 12 };
        assert_eq!(error.to_string(), "Invalid crop rectangle: 0x12");
    }

    #[test]
    fn test_background_removal_display() {
        let error = AvatarError::BackgroundRemovalError("Service returned 500".to_string());
        assert_eq!(
            error.to_string(),
            "Background removal failed: Service returned 500"
        );
    }

    #[test]
    fn test_error_debug_format() {
        let error = AvatarError::CaptureError("Debug test".to_string());
        let debug_str = format!("{:?}", error);
        assert!(debug_str.contains("CaptureError"));
        assert!(debug_str.contains("Debug test"));
    }

    #[test]
    fn test_io_error_is_wrapped() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let error: AvatarError = io.into();
        assert!(matches!(error, AvatarError::IoError(_)));
        assert!(error.source().is_some());
    }

    #[test]
    fn test_image_error_converts() {
        let decode = image::load_from_memory(b"not an image").unwrap_err();
        let error: AvatarError = decode.into();
        assert!(matches!(error, AvatarError::ImageError(_)));
    }

    #[test]
    fn test_all_error_variants_have_messages() {
        let errors = vec![
            AvatarError::ConfigError("config".to_string()),
            AvatarError::CameraError("camera".to_string()),
            AvatarError::CaptureError("capture".to_string()),
            AvatarError::ImageError("image".to_string()),
            AvatarError::StorageError("storage".to_string()),
            AvatarError::CatalogError("catalog".to_string()),
            AvatarError::TaskError("task".to_string()),
        ];

        for error in errors {
            let message = error.to_string();
            assert!(message.contains(": "), "{}", message);
            let _error_trait: &dyn Error = &error;
        }
    }

    #[test]
    fn test_errors_are_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<AvatarError>();
    }
}
