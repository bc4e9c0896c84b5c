fn main() {
    // 仅桌面外壳需要 Tauri 的资源与配置生成
    #[cfg(feature = "desktop")]
    tauri_build::build()
}
