fn main() {
    video_downloader_lib::run()
}
